use super::{Point3, Vector3, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point3,
    d1: &Vector3,
    p2: &Point3,
    d2: &Vector3,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point3,
    a1: &Point3,
    b0: &Point3,
    b1: &Point3,
) -> Option<(Point3, f64, f64)> {
    let da = Vector3::new(a1.x - a0.x, a1.y - a0.y, 0.0);
    let db = Vector3::new(b1.x - b0.x, b1.y - b0.y, 0.0);

    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        let pt = Point3::new(a0.x + da.x * t_clamped, a0.y + da.y * t_clamped, a0.z);
        Some((pt, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of an unbounded line `origin + t * dir` with a full circle.
///
/// Returns zero, one (tangent) or two points. `z` is taken from `origin`.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point3,
    dir: &Vector3,
    center: &Point3,
    radius: f64,
) -> Vec<Point3> {
    let a = dir.x * dir.x + dir.y * dir.y;
    if a < TOLERANCE * TOLERANCE || radius < TOLERANCE {
        return Vec::new();
    }

    // (origin + t*dir - center)² = r²
    let fx = origin.x - center.x;
    let fy = origin.y - center.y;
    let b = 2.0 * (fx * dir.x + fy * dir.y);
    let c = fx * fx + fy * fy - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    // Scale-aware slack so grazing contacts still count as tangent.
    let slack = TOLERANCE * radius.max(1.0) * a;
    if discriminant < -slack {
        return Vec::new();
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    let roots = if disc_sqrt < TOLERANCE {
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    roots
        .into_iter()
        .map(|t| Point3::new(origin.x + dir.x * t, origin.y + dir.y * t, origin.z))
        .collect()
}

/// Intersection of two full circles in 2D.
///
/// Concentric circles yield no points. `z` is taken from `c1`.
#[must_use]
pub fn circle_circle_intersect_2d(c1: &Point3, r1: f64, c2: &Point3, r2: f64) -> Vec<Point3> {
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return Vec::new();
    }

    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let dist_sq = dx * dx + dy * dy;
    let dist = dist_sq.sqrt();
    if dist < TOLERANCE {
        return Vec::new();
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + TOLERANCE || dist < diff - TOLERANCE {
        return Vec::new();
    }

    // Distance from c1 along the line c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let mx = c1.x + a * dx / dist;
    let my = c1.y + a * dy / dist;
    let px = -dy / dist;
    let py = dx / dist;

    if h < TOLERANCE {
        vec![Point3::new(mx, my, c1.z)]
    } else {
        vec![
            Point3::new(mx + h * px, my + h * py, c1.z),
            Point3::new(mx - h * px, my - h * py, c1.z),
        ]
    }
}
