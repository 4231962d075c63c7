use super::intersect_2d::segment_segment_intersect_2d;
use super::{Point3, Vector2, POINT_TOLERANCE, TOLERANCE};

/// Computes the signed area of a polygon in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Planar distance from `point` to the segment `a`–`b`, ignoring elevation.
#[must_use]
pub fn distance_to_segment_2d(point: &Point3, a: &Point3, b: &Point3) -> f64 {
    let ab = Vector2::new(b.x - a.x, b.y - a.y);
    let ap = Vector2::new(point.x - a.x, point.y - a.y);
    let len_sq = ab.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return ap.norm();
    }
    let t = (ap.dot(&ab) / len_sq).clamp(0.0, 1.0);
    (ap - ab * t).norm()
}

/// Returns `true` if `point` lies within [`POINT_TOLERANCE`] of any polygon edge.
#[must_use]
pub fn point_on_polygon_boundary(point: &Point3, polygon: &[Point3]) -> bool {
    let n = polygon.len();
    (0..n).any(|i| {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        distance_to_segment_2d(point, a, b) < POINT_TOLERANCE
    })
}

/// Even-odd ray casting test in the XY plane. Boundary points are ambiguous;
/// check [`point_on_polygon_boundary`] first when that matters.
#[must_use]
pub fn point_in_polygon_2d(point: &Point3, polygon: &[Point3]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Returns `true` if two non-adjacent edges of the closed polygon cross or touch.
#[must_use]
pub fn polygon_self_intersects(polygon: &[Point3]) -> bool {
    let n = polygon.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        let a0 = &polygon[i];
        let a1 = &polygon[(i + 1) % n];
        for j in (i + 2)..n {
            // The last edge closes onto the first one.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &polygon[j];
            let b1 = &polygon[(j + 1) % n];
            if segment_segment_intersect_2d(a0, a1, b0, b1).is_some() {
                return true;
            }
        }
    }
    false
}

/// Drops consecutive duplicates and vertices lying on the line through
/// their neighbours.
#[must_use]
pub fn remove_collinear(points: &[Point3]) -> Vec<Point3> {
    let mut deduped: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if deduped
            .last()
            .is_none_or(|last| (p - last).norm() > POINT_TOLERANCE)
        {
            deduped.push(*p);
        }
    }
    while deduped.len() > 1 {
        let first = deduped[0];
        let last = deduped[deduped.len() - 1];
        if (first - last).norm() > POINT_TOLERANCE {
            break;
        }
        deduped.pop();
    }

    let mut changed = true;
    while changed && deduped.len() > 3 {
        changed = false;
        let n = deduped.len();
        for i in 0..n {
            let prev = deduped[(i + n - 1) % n];
            let curr = deduped[i];
            let next = deduped[(i + 1) % n];
            let span = (next - prev).norm();
            if span > POINT_TOLERANCE
                && distance_to_segment_2d(&curr, &prev, &next) < POINT_TOLERANCE
            {
                deduped.remove(i);
                changed = true;
                break;
            }
        }
    }
    deduped
}
