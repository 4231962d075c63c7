use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A bounded line segment.
///
/// The parametric form is: `P(t) = start + t * direction`, `t ∈ [0, length]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    start: Point3,
    end: Point3,
}

impl Line {
    /// Creates a new line segment between two points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self, GeometryError> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector);
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns the unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start) / self.length()
    }

    /// Shifts the segment by `distance` along `direction × axis`.
    #[must_use]
    pub fn offset(&self, distance: f64, axis: &Vector3) -> Self {
        let side = self.direction().cross(axis);
        let delta = side * distance;
        self.translated(&delta)
    }

    /// Translates the segment by `delta`.
    #[must_use]
    pub fn translated(&self, delta: &Vector3) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Point3 {
        self.start + self.direction() * t
    }

    fn tangent(&self, _t: f64) -> Vector3 {
        self.direction()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length())
    }

    fn start_point(&self) -> Point3 {
        self.start
    }

    fn end_point(&self) -> Point3 {
        self.end
    }
}
