use tracing::warn;

use crate::document::Document;
use crate::error::{BoundaryError, LookupError, Result, RoomlineError};
use crate::geometry::CurveSegment;
use crate::model::{chain_segments, ElementId, SegmentLoop};

/// Retrieves the raw boundary loops of a region from the host.
///
/// Loops come back in host order (loop 0 is the outer contour) and are
/// re-read on every call.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryLoops {
    region: ElementId,
}

impl BoundaryLoops {
    /// Creates a new `BoundaryLoops` operation.
    #[must_use]
    pub fn new(region: ElementId) -> Self {
        Self { region }
    }

    /// Executes the retrieval.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Region`] for an unknown region and
    /// [`BoundaryError::BoundaryUnavailable`] when the host cannot compute
    /// the boundary, reports no loops, or reports a loop that is not closed.
    pub fn execute<D: Document>(&self, document: &D) -> Result<Vec<SegmentLoop>> {
        if document.region(self.region).is_none() {
            return Err(LookupError::Region(self.region).into());
        }

        let loops = document
            .boundary_segments(self.region)
            .map_err(|e| self.unavailable(e.to_string()))?;
        if loops.is_empty() {
            return Err(self.unavailable("host reported no boundary loops".into()));
        }
        for (index, segments) in loops.iter().enumerate() {
            chain_segments(segments)
                .map_err(|e| self.unavailable(format!("loop {index}: {e}")))?;
        }
        Ok(loops)
    }

    fn unavailable(&self, reason: String) -> RoomlineError {
        BoundaryError::BoundaryUnavailable {
            region: self.region,
            reason,
        }
        .into()
    }
}

/// The elements bounding a region, with the curves they produce when known.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryElements {
    /// Read from the boundary segments: one entry per segment in loop order.
    /// `None` marks segments without a backing element.
    Primary {
        elements: Vec<Option<ElementId>>,
        curves: Vec<CurveSegment>,
    },
    /// Recovered by spatial analysis after the boundary segments were
    /// unavailable. Each element is listed once and no curves are known,
    /// so this is a best-effort answer and not a substitute for the loops.
    Degraded { elements: Vec<ElementId> },
}

impl BoundaryElements {
    /// Collects the bounding elements of `region`.
    ///
    /// Tries the boundary segments first and falls back to the host's
    /// spatial analysis only when they are unavailable.
    ///
    /// # Errors
    ///
    /// Propagates any error of the primary path other than
    /// [`BoundaryError::BoundaryUnavailable`]. If the fallback also fails,
    /// returns `BoundaryUnavailable` with both reasons.
    pub fn collect<D: Document>(document: &D, region: ElementId) -> Result<Self> {
        let reason = match BoundaryLoops::new(region).execute(document) {
            Ok(loops) => {
                let (elements, curves) = loops
                    .into_iter()
                    .flatten()
                    .map(|segment| (segment.element, segment.curve))
                    .unzip();
                return Ok(Self::Primary { elements, curves });
            }
            Err(RoomlineError::Boundary(BoundaryError::BoundaryUnavailable { reason, .. })) => {
                reason
            }
            Err(e) => return Err(e),
        };

        let faces = document.spatial_faces(region).map_err(|e| {
            BoundaryError::BoundaryUnavailable {
                region,
                reason: format!("{reason}; spatial fallback failed: {e}"),
            }
        })?;
        warn!(%region, %reason, "boundary segments unavailable, using spatial analysis");

        let mut elements = Vec::new();
        for id in faces.into_iter().flat_map(|f| f.boundary_elements) {
            if !elements.contains(&id) {
                elements.push(id);
            }
        }
        Ok(Self::Degraded { elements })
    }

    /// Returns `true` for a result of the spatial fallback.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The distinct bounding elements, in first-seen order.
    #[must_use]
    pub fn elements(&self) -> Vec<ElementId> {
        match self {
            Self::Primary { elements, .. } => {
                let mut distinct = Vec::new();
                for id in elements.iter().flatten() {
                    if !distinct.contains(id) {
                        distinct.push(*id);
                    }
                }
                distinct
            }
            Self::Degraded { elements } => elements.clone(),
        }
    }

    /// Boundary curves; empty for a degraded result.
    #[must_use]
    pub fn curves(&self) -> &[CurveSegment] {
        match self {
            Self::Primary { curves, .. } => curves,
            Self::Degraded { .. } => &[],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, SpatialFace};
    use crate::geometry::Line;
    use crate::math::Point3;
    use crate::model::{BoundarySegment, Region};
    use crate::operations::test_support::{square_room, ROOM, WALLS};

    fn add_unbounded_region(doc: &mut MemoryDocument, id: ElementId) {
        doc.add_region(
            Region {
                id,
                level: ElementId(1),
                phase: ElementId(2),
                name: String::new(),
                number: String::new(),
            },
            None,
        );
    }

    #[test]
    fn loops_come_back_in_host_order() {
        let doc = square_room();
        let loops = BoundaryLoops::new(ROOM).execute(&doc).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
        assert_eq!(loops[0][0].element, Some(WALLS[0]));
    }

    #[test]
    fn unknown_region_is_a_lookup_error() {
        let doc = square_room();
        let err = BoundaryLoops::new(ElementId(7)).execute(&doc).unwrap_err();
        assert!(matches!(err, RoomlineError::Lookup(LookupError::Region(_))));
    }

    #[test]
    fn open_loop_is_unavailable() {
        let mut doc = MemoryDocument::new();
        let id = ElementId(1);
        let open = vec![
            BoundarySegment::new(
                Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)).unwrap(),
                None,
            ),
            BoundarySegment::new(
                Line::new(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)).unwrap(),
                None,
            ),
        ];
        doc.add_region(
            Region {
                id,
                level: ElementId(1),
                phase: ElementId(2),
                name: String::new(),
                number: String::new(),
            },
            Some(vec![open]),
        );
        let err = BoundaryLoops::new(id).execute(&doc).unwrap_err();
        assert!(matches!(
            err,
            RoomlineError::Boundary(BoundaryError::BoundaryUnavailable { .. })
        ));
    }

    #[test]
    fn primary_elements_follow_segments() {
        let doc = square_room();
        let result = BoundaryElements::collect(&doc, ROOM).unwrap();
        assert!(!result.is_degraded());
        assert_eq!(result.elements(), WALLS.to_vec());
        assert_eq!(result.curves().len(), 4);
    }

    #[test]
    fn falls_back_to_spatial_analysis() {
        let mut doc = MemoryDocument::new();
        let id = ElementId(3);
        add_unbounded_region(&mut doc, id);
        doc.set_spatial_faces(
            id,
            vec![
                SpatialFace {
                    boundary_elements: vec![ElementId(11), ElementId(12)],
                },
                SpatialFace {
                    boundary_elements: vec![ElementId(12), ElementId(13)],
                },
            ],
        )
        .unwrap();
        let result = BoundaryElements::collect(&doc, id).unwrap();
        assert!(result.is_degraded());
        assert_eq!(
            result.elements(),
            vec![ElementId(11), ElementId(12), ElementId(13)]
        );
        assert!(result.curves().is_empty());
    }

    #[test]
    fn failing_fallback_reports_both_reasons() {
        let mut doc = MemoryDocument::new();
        let id = ElementId(3);
        add_unbounded_region(&mut doc, id);
        let err = BoundaryElements::collect(&doc, id).unwrap_err();
        let RoomlineError::Boundary(BoundaryError::BoundaryUnavailable { reason, .. }) = &err else {
            panic!("expected BoundaryUnavailable, got {err:?}");
        };
        assert!(reason.contains("spatial fallback failed"));
    }
}
