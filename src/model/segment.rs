use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{CurveLoop, CurveSegment};

use super::ElementId;

/// One edge of a region boundary loop as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySegment {
    pub curve: CurveSegment,
    /// Element that produced the segment. `None` for room separation lines
    /// and other boundaries without a backing element.
    #[serde(default)]
    pub element: Option<ElementId>,
}

impl BoundarySegment {
    /// Creates a segment produced by `element`.
    #[must_use]
    pub fn new(curve: impl Into<CurveSegment>, element: Option<ElementId>) -> Self {
        Self {
            curve: curve.into(),
            element,
        }
    }
}

/// An ordered, closed sequence of boundary segments.
pub type SegmentLoop = Vec<BoundarySegment>;

/// Joins the curves of a segment loop into one closed chain.
///
/// # Errors
///
/// Returns [`GeometryError::LoopNotClosed`] if consecutive segments do not
/// meet, or [`GeometryError::Degenerate`] for an empty loop.
pub fn chain_segments(segments: &[BoundarySegment]) -> Result<CurveLoop, GeometryError> {
    CurveLoop::new(segments.iter().map(|s| s.curve.clone()).collect())
}
