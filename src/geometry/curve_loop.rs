use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::polygon_2d::{remove_collinear, signed_area_2d};
use crate::math::{Point3, Vector3, POINT_TOLERANCE, TOLERANCE};

use super::curve::{Curve, CurveSegment, Line};

/// Chord tolerance used whenever arcs are flattened into polygons.
pub const CHORD_TOLERANCE: f64 = 1e-3;

/// A closed, ordered chain of curves.
///
/// Invariant: the end point of curve `i` coincides with the start point of
/// curve `(i + 1) % n` within [`POINT_TOLERANCE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveSegment>", into = "Vec<CurveSegment>")]
pub struct CurveLoop {
    curves: Vec<CurveSegment>,
}

impl CurveLoop {
    /// Builds a loop from curves that already chain end-to-start.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for an empty chain and
    /// [`GeometryError::LoopNotClosed`] at the first gap.
    pub fn new(curves: Vec<CurveSegment>) -> Result<Self, GeometryError> {
        if curves.is_empty() {
            return Err(GeometryError::Degenerate("curve loop has no curves".into()));
        }
        if let Some((index, gap)) = first_gap(&curves) {
            return Err(GeometryError::LoopNotClosed { index, gap });
        }
        Ok(Self { curves })
    }

    /// Builds a closed polygonal loop through `points` (the closing edge is implied).
    ///
    /// Consecutive duplicates are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than three distinct points remain.
    pub fn from_points(points: &[Point3]) -> Result<Self, GeometryError> {
        let mut distinct: Vec<Point3> = Vec::with_capacity(points.len());
        for p in points {
            if distinct
                .last()
                .is_none_or(|last| (p - last).norm() > POINT_TOLERANCE)
            {
                distinct.push(*p);
            }
        }
        if distinct.len() > 1 && (distinct[0] - distinct[distinct.len() - 1]).norm() <= POINT_TOLERANCE
        {
            distinct.pop();
        }
        if distinct.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 3 distinct points, got {}",
                distinct.len()
            )));
        }
        let n = distinct.len();
        let curves = (0..n)
            .map(|i| Line::new(distinct[i], distinct[(i + 1) % n]).map(CurveSegment::Line))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(curves)
    }

    /// Thickens a line into a closed rectangle of width `thickness`,
    /// centered on the line, in the plane perpendicular to `axis`.
    ///
    /// The rectangle runs counter-clockwise about `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for a non-positive thickness or
    /// a line parallel to `axis`.
    pub fn thicken(line: &Line, thickness: f64, axis: &Vector3) -> Result<Self, GeometryError> {
        if thickness < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "thickness {thickness} must be positive"
            )));
        }
        let side = axis.cross(&line.direction());
        if side.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cannot thicken a line parallel to the thickening axis".into(),
            ));
        }
        // axis × direction is the left side, so this order is counter-clockwise.
        let half = side.normalize() * (thickness / 2.0);
        Self::from_points(&[
            line.start() - half,
            line.end() - half,
            line.end() + half,
            line.start() + half,
        ])
    }

    /// Returns the curves in loop order.
    #[must_use]
    pub fn curves(&self) -> &[CurveSegment] {
        &self.curves
    }

    /// Number of curves in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Always `false`: a loop holds at least one curve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Start point of every curve, in loop order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point3> {
        self.curves.iter().map(Curve::start_point).collect()
    }

    /// Elevation of the loop (z of its first vertex).
    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.curves[0].start_point().z
    }

    /// Flattens the loop into a polygon, without repeating the first point.
    #[must_use]
    pub fn tessellate(&self, chord_tolerance: f64) -> Vec<Point3> {
        let mut points = Vec::with_capacity(self.curves.len() * 2);
        for curve in &self.curves {
            let pts = curve.tessellate(chord_tolerance);
            points.extend_from_slice(&pts[..pts.len() - 1]);
        }
        points
    }

    /// Polygon of the loop with collinear vertices dropped.
    #[must_use]
    pub fn outline(&self) -> Vec<Point3> {
        remove_collinear(&self.tessellate(CHORD_TOLERANCE))
    }

    /// Signed XY area; positive when the loop runs counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.tessellate(CHORD_TOLERANCE))
    }

    /// Returns `true` if the loop runs counter-clockwise about +Z.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Largest end-to-start distance between consecutive curves.
    #[must_use]
    pub fn max_closure_gap(&self) -> f64 {
        let n = self.curves.len();
        (0..n)
            .map(|i| (self.curves[(i + 1) % n].start_point() - self.curves[i].end_point()).norm())
            .fold(0.0, f64::max)
    }

    /// Translates every curve by `delta`.
    #[must_use]
    pub fn translated(&self, delta: &Vector3) -> Self {
        Self {
            curves: self.curves.iter().map(|c| c.translated(delta)).collect(),
        }
    }

    /// Returns `true` if both loops trace the same polygon, irrespective of
    /// starting vertex and of collinear splits.
    #[must_use]
    pub fn same_shape(&self, other: &Self, tolerance: f64) -> bool {
        let a = self.outline();
        let b = other.outline();
        if a.len() != b.len() {
            return false;
        }
        let Some(shift) = b.iter().position(|p| (p - a[0]).norm() <= tolerance) else {
            return false;
        };
        let n = a.len();
        (0..n).all(|i| (a[i] - b[(i + shift) % n]).norm() <= tolerance)
    }
}

impl TryFrom<Vec<CurveSegment>> for CurveLoop {
    type Error = GeometryError;

    fn try_from(curves: Vec<CurveSegment>) -> Result<Self, Self::Error> {
        Self::new(curves)
    }
}

impl From<CurveLoop> for Vec<CurveSegment> {
    fn from(curve_loop: CurveLoop) -> Self {
        curve_loop.curves
    }
}

fn first_gap(curves: &[CurveSegment]) -> Option<(usize, f64)> {
    let n = curves.len();
    (0..n).find_map(|i| {
        let gap = (curves[(i + 1) % n].start_point() - curves[i].end_point()).norm();
        (gap > POINT_TOLERANCE).then_some((i, gap))
    })
}
