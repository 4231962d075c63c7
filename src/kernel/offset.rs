use crate::error::GeometryError;
use crate::geometry::{Curve, CurveLoop, CurveSegment, Line, CHORD_TOLERANCE};
use crate::math::intersect_2d::{
    circle_circle_intersect_2d, line_circle_intersect_2d, line_line_intersect_2d,
};
use crate::math::polygon_2d::polygon_self_intersects;
use crate::math::{Point3, Vector3, POINT_TOLERANCE, TOLERANCE};

/// Sine of the angle below which two tangents count as parallel.
const PARALLEL_TOL: f64 = 1e-9;

/// How two consecutive offset curves meet.
#[derive(Debug, Clone, Copy)]
enum Joint {
    /// Both curves are trimmed or extended to one point.
    Point(Point3),
    /// Tangent-continuous neighbours offset by different amounts:
    /// a straight step joins the end of one to the start of the next.
    Step { end: Point3, start: Point3 },
}

impl Joint {
    fn end_of_previous(&self) -> Point3 {
        match *self {
            Self::Point(p) => p,
            Self::Step { end, .. } => end,
        }
    }

    fn start_of_next(&self) -> Point3 {
        match *self {
            Self::Point(p) => p,
            Self::Step { start, .. } => start,
        }
    }
}

/// Offsets each curve of a closed loop by its own distance along
/// `tangent × axis` and rejoins the displaced curves into a closed loop.
pub(super) fn offset_curve_loop(
    curve_loop: &CurveLoop,
    distances: &[f64],
    axis: &Vector3,
) -> Result<CurveLoop, GeometryError> {
    let curves = curve_loop.curves();
    let n = curves.len();
    if distances.len() != n {
        return Err(GeometryError::Degenerate(format!(
            "{} offset distances given for a loop of {n} curves",
            distances.len()
        )));
    }
    if axis.norm() < TOLERANCE {
        return Err(GeometryError::ZeroVector);
    }
    let axis = axis.normalize();

    if distances.iter().all(|d| d.abs() < TOLERANCE) {
        return Ok(curve_loop.clone());
    }

    let displaced = curves
        .iter()
        .zip(distances)
        .map(|(curve, &d)| curve.offset(d, &axis))
        .collect::<Result<Vec<_>, _>>()?;

    let joints = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            resolve_joint(
                i,
                (&curves[i], &displaced[i], distances[i]),
                (&curves[j], &displaced[j], distances[j]),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut pieces = Vec::with_capacity(n + 2);
    for i in 0..n {
        let start = joints[(i + n - 1) % n].start_of_next();
        let end = joints[i].end_of_previous();
        let trimmed = displaced[i].trimmed(start, end).map_err(|_| {
            GeometryError::Degenerate(format!("curve {i} collapses under offset {}", distances[i]))
        })?;
        ensure_same_direction(i, &curves[i], &trimmed)?;
        pieces.push(trimmed);
        if let Joint::Step { end, start } = joints[i] {
            pieces.push(CurveSegment::Line(Line::new(end, start)?));
        }
    }

    let result = CurveLoop::new(pieces)?;
    if polygon_self_intersects(&result.tessellate(CHORD_TOLERANCE)) {
        return Err(GeometryError::Degenerate(
            "offset loop intersects itself".into(),
        ));
    }
    Ok(result)
}

/// Finds where the displaced curve `i` meets the displaced curve `i + 1`.
fn resolve_joint(
    index: usize,
    (prev, prev_offset, prev_distance): (&CurveSegment, &CurveSegment, f64),
    (next, next_offset, next_distance): (&CurveSegment, &CurveSegment, f64),
) -> Result<Joint, GeometryError> {
    let vertex = prev.end_point();
    if prev_distance.abs() < TOLERANCE && next_distance.abs() < TOLERANCE {
        return Ok(Joint::Point(vertex));
    }

    let t1 = prev.end_tangent();
    let t2 = next.start_tangent();
    let sine = t1.x * t2.y - t1.y * t2.x;
    if sine.abs() < PARALLEL_TOL {
        if t1.dot(&t2) < 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "curves {index} and {} fold back on each other",
                index + 1
            )));
        }
        let end = prev_offset.end_point();
        let start = next_offset.start_point();
        if (prev_distance - next_distance).abs() < TOLERANCE || (end - start).norm() < POINT_TOLERANCE
        {
            return Ok(Joint::Point(end));
        }
        return Ok(Joint::Step { end, start });
    }

    let candidates = match (prev_offset, next_offset) {
        (CurveSegment::Line(a), CurveSegment::Line(b)) => {
            line_line_intersect_2d(a.start(), &a.direction(), b.start(), &b.direction())
                .map(|(t, _)| {
                    let p = a.start() + a.direction() * t;
                    vec![Point3::new(p.x, p.y, vertex.z)]
                })
                .unwrap_or_default()
        }
        (CurveSegment::Line(a), CurveSegment::Arc(b))
        | (CurveSegment::Arc(b), CurveSegment::Line(a)) => {
            line_circle_intersect_2d(a.start(), &a.direction(), b.center(), b.radius())
        }
        (CurveSegment::Arc(a), CurveSegment::Arc(b)) => {
            circle_circle_intersect_2d(a.center(), a.radius(), b.center(), b.radius())
        }
    };

    candidates
        .into_iter()
        .min_by(|a, b| (a - vertex).norm().total_cmp(&(b - vertex).norm()))
        .map(|p| Joint::Point(Point3::new(p.x, p.y, vertex.z)))
        .ok_or_else(|| {
            GeometryError::Degenerate(format!(
                "offset curves {index} and {} no longer meet",
                index + 1
            ))
        })
}

/// Rejects offset curves that were trimmed past their own length.
fn ensure_same_direction(
    index: usize,
    original: &CurveSegment,
    trimmed: &CurveSegment,
) -> Result<(), GeometryError> {
    let reversed = match (original, trimmed) {
        (CurveSegment::Line(a), CurveSegment::Line(b)) => a.direction().dot(&b.direction()) <= 0.0,
        (CurveSegment::Arc(a), CurveSegment::Arc(b)) => {
            (a.sweep() - b.sweep()).abs() > std::f64::consts::PI
        }
        _ => true,
    };
    if reversed {
        return Err(GeometryError::Degenerate(format!(
            "curve {index} reverses under offset"
        )));
    }
    Ok(())
}
