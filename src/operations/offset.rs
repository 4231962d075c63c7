use tracing::debug;

use crate::document::Document;
use crate::error::{BoundaryError, GeometryError, Result, RoomlineError};
use crate::geometry::CurveLoop;
use crate::kernel::GeometryKernel;
use crate::math::{basis_z, POINT_TOLERANCE, TOLERANCE};
use crate::model::{chain_segments, BoundarySegment, ElementId, WallKind};
use crate::options::OffsetPolicy;

use super::WallThickness;

/// Turns one raw boundary loop into a closed curve loop with its
/// curtain-wall segments moved towards the room interior.
///
/// Only segments produced by curtain walls move. Distances are measured
/// inwards: positive moves into the room, negative away from it. The room
/// lies inside the outer loop (index 0) and outside every other loop,
/// whatever the direction the host reports them in.
#[derive(Debug, Clone, Copy)]
pub struct OffsetLoop<'a> {
    region: ElementId,
    loop_index: usize,
    segments: &'a [BoundarySegment],
    policy: OffsetPolicy,
}

impl<'a> OffsetLoop<'a> {
    /// Creates a new `OffsetLoop` operation for loop `loop_index` of `region`.
    #[must_use]
    pub fn new(
        region: ElementId,
        loop_index: usize,
        segments: &'a [BoundarySegment],
        policy: OffsetPolicy,
    ) -> Self {
        Self {
            region,
            loop_index,
            segments,
            policy,
        }
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::OffsetFailed`] if the segments do not chain
    /// into a closed loop or the kernel cannot offset it without breaking
    /// closure, and any error of [`WallThickness`] for curtain segments
    /// under [`OffsetPolicy::HalfThickness`].
    pub fn execute<D, K>(&self, document: &D, kernel: &K) -> Result<CurveLoop>
    where
        D: Document,
        K: GeometryKernel,
    {
        let chain = chain_segments(self.segments).map_err(|e| self.failed(e))?;
        if self.policy.is_zero() {
            return Ok(chain);
        }

        let inward = self.inward_distances(document)?;
        if inward.iter().all(|d| d.abs() < TOLERANCE) {
            return Ok(chain);
        }

        // Displacement runs along tangent × up, which is the right-hand side
        // of the loop; the room is on the left-hand side when the outer loop
        // turns counter-clockwise or a hole turns clockwise.
        let room_on_left = (self.loop_index == 0) == chain.is_counter_clockwise();
        let sign = if room_on_left { -1.0 } else { 1.0 };
        let distances: Vec<f64> = inward.iter().map(|d| d * sign).collect();
        debug!(
            region = %self.region,
            loop_index = self.loop_index,
            ?distances,
            "offsetting curtain segments"
        );

        let offset = kernel
            .offset_loop(&chain, &distances, &basis_z())
            .map_err(|e| self.failed(e))?;
        let gap = offset.max_closure_gap();
        if gap > POINT_TOLERANCE {
            return Err(self.failed(GeometryError::LoopNotClosed { index: 0, gap }));
        }
        Ok(offset)
    }

    /// Inward distance of every segment: zero unless it comes from a curtain wall.
    fn inward_distances<D: Document>(&self, document: &D) -> Result<Vec<f64>> {
        self.segments
            .iter()
            .map(|segment| {
                let Some(wall) = segment.element.and_then(|id| document.wall(id)) else {
                    return Ok(0.0);
                };
                if wall.kind() != WallKind::Curtain {
                    return Ok(0.0);
                }
                match self.policy {
                    OffsetPolicy::HalfThickness => {
                        Ok(WallThickness::new(wall.id).execute(document)? / 2.0)
                    }
                    OffsetPolicy::Distance(d) => Ok(d),
                    OffsetPolicy::Zero => Ok(0.0),
                }
            })
            .collect()
    }

    fn failed(&self, source: GeometryError) -> RoomlineError {
        BoundaryError::OffsetFailed {
            region: self.region,
            loop_index: self.loop_index,
            source,
        }
        .into()
    }
}
