mod arc;
mod line;

pub use arc::Arc;
pub use line::Line;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }
}

/// Trait for bounded parametric curves lying in a horizontal plane.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point3;

    /// Unit tangent at parameter `t`, pointing towards increasing `t`.
    fn tangent(&self, t: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Point at the start of the domain.
    fn start_point(&self) -> Point3 {
        self.evaluate(self.domain().t_min)
    }

    /// Point at the end of the domain.
    fn end_point(&self) -> Point3 {
        self.evaluate(self.domain().t_max)
    }
}

/// A boundary curve: either a line segment or a circular arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveSegment {
    /// A straight segment.
    Line(Line),
    /// A horizontal circular arc.
    Arc(Arc),
}

impl CurveSegment {
    /// Tangent at the start of the segment.
    #[must_use]
    pub fn start_tangent(&self) -> Vector3 {
        self.tangent(self.domain().t_min)
    }

    /// Tangent at the end of the segment.
    #[must_use]
    pub fn end_tangent(&self) -> Vector3 {
        self.tangent(self.domain().t_max)
    }

    /// Displaces the segment by `distance` along `tangent × axis`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if an arc collapses (radius ≤ 0).
    pub fn offset(&self, distance: f64, axis: &Vector3) -> Result<Self, GeometryError> {
        match self {
            Self::Line(line) => Ok(Self::Line(line.offset(distance, axis))),
            Self::Arc(arc) => arc.offset(distance, axis).map(Self::Arc),
        }
    }

    /// Returns the same curve shape re-bounded to new end points.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed curve would be degenerate.
    pub fn trimmed(&self, start: Point3, end: Point3) -> Result<Self, GeometryError> {
        match self {
            Self::Line(_) => Line::new(start, end).map(Self::Line),
            Self::Arc(arc) => arc.trimmed(start, end).map(Self::Arc),
        }
    }

    /// Translates the segment by `delta`.
    #[must_use]
    pub fn translated(&self, delta: &Vector3) -> Self {
        match self {
            Self::Line(line) => Self::Line(line.translated(delta)),
            Self::Arc(arc) => Self::Arc(arc.translated(delta)),
        }
    }

    /// Points along the segment, start included and end included.
    ///
    /// Arcs are split into chords deviating at most `chord_tolerance` from the arc.
    #[must_use]
    pub fn tessellate(&self, chord_tolerance: f64) -> Vec<Point3> {
        match self {
            Self::Line(line) => vec![*line.start(), *line.end()],
            Self::Arc(arc) => arc.tessellate(chord_tolerance),
        }
    }
}

impl Curve for CurveSegment {
    fn evaluate(&self, t: f64) -> Point3 {
        match self {
            Self::Line(line) => line.evaluate(t),
            Self::Arc(arc) => arc.evaluate(t),
        }
    }

    fn tangent(&self, t: f64) -> Vector3 {
        match self {
            Self::Line(line) => line.tangent(t),
            Self::Arc(arc) => arc.tangent(t),
        }
    }

    fn domain(&self) -> CurveDomain {
        match self {
            Self::Line(line) => line.domain(),
            Self::Arc(arc) => arc.domain(),
        }
    }
}

impl From<Line> for CurveSegment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Arc> for CurveSegment {
    fn from(arc: Arc) -> Self {
        Self::Arc(arc)
    }
}
