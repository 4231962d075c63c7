use tracing::{debug, info};

use crate::document::Document;
use crate::error::{BoundaryError, GeometryError, LookupError, Result, RoomlineError};
use crate::geometry::CurveLoop;
use crate::kernel::{FaceSelector, GeometryKernel, SolidId};
use crate::math::{basis_z, Vector3, TOLERANCE};
use crate::model::ElementId;

use super::{BoundingDoors, DoorOutline, DoorsBounding};

/// Height of the transient prisms the merge works on.
pub const UNIT_HEIGHT: f64 = 1.0;

/// Extends a region's boundary through its door openings.
///
/// The boundary loops and every door outline are extruded into prisms and
/// unioned; the bottom face of the result is the merged boundary. Doors that
/// do not bound the region, or whose width is unknown, are skipped.
#[derive(Debug, Clone)]
pub struct MergeBoundary {
    region: ElementId,
    loops: Vec<CurveLoop>,
    doors: Vec<ElementId>,
    depth: f64,
    depth_ratio: f64,
}

impl MergeBoundary {
    /// Creates a new `MergeBoundary` operation merging `doors`, in order,
    /// into the `loops` of `region`.
    #[must_use]
    pub fn new(region: ElementId, loops: Vec<CurveLoop>, doors: Vec<ElementId>) -> Self {
        Self {
            region,
            loops,
            doors,
            depth: 0.0,
            depth_ratio: 0.5,
        }
    }

    /// Sets the door outline depth (zero or less means wall thickness).
    #[must_use]
    pub fn depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the ratio scaling the door outline depth.
    #[must_use]
    pub fn depth_ratio(mut self, depth_ratio: f64) -> Self {
        self.depth_ratio = depth_ratio;
        self
    }

    /// Executes the merge.
    ///
    /// With no doors to merge the loops are returned unchanged and the
    /// kernel is not touched. Every solid created on the way is released
    /// before returning, on success and on failure.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Region`] for an unknown region,
    /// [`BoundaryError::MergeFailed`] if the kernel rejects an extrusion or a
    /// union or a door outline cannot be built, and the
    /// [`WallThickness`](super::WallThickness) errors of host walls.
    pub fn execute<D, K>(&self, document: &D, kernel: &mut K) -> Result<Vec<CurveLoop>>
    where
        D: Document,
        K: GeometryKernel,
    {
        if self.doors.is_empty() {
            return Ok(self.loops.clone());
        }

        let region = document
            .region(self.region)
            .ok_or(LookupError::Region(self.region))?;
        let bounding = DoorsBounding::new(region.id, region.phase).execute(document);

        let room = kernel
            .extrude(&self.loops, &basis_z(), UNIT_HEIGHT)
            .map_err(|e| self.failed(None, e))?;
        let merged = self.union_doors(document, kernel, room, &bounding).and_then(|()| {
            kernel
                .face_boundary(room, FaceSelector::Bottom)
                .map_err(|e| self.failed(None, e))
        });
        kernel.release(room);

        let merged = merged?;
        info!(
            region = %self.region,
            loops = merged.len(),
            "merged door openings into boundary"
        );
        Ok(merged)
    }

    fn union_doors<D, K>(
        &self,
        document: &D,
        kernel: &mut K,
        room: SolidId,
        bounding: &BoundingDoors,
    ) -> Result<()>
    where
        D: Document,
        K: GeometryKernel,
    {
        let elevation = self.loops.first().map_or(0.0, CurveLoop::elevation);

        for &id in &self.doors {
            let Some(door) = bounding.get(id) else {
                debug!(
                    region = %self.region,
                    door = %id,
                    "door does not bound the region, skipping"
                );
                continue;
            };
            let outline = DoorOutline::new(self.region, door, self.depth, self.depth_ratio)
                .execute(document)
                .map_err(|e| match e {
                    RoomlineError::Geometry(source) => self.failed(Some(id), source),
                    other => other,
                })?;
            let Some(outline) = outline else {
                continue;
            };

            // Door placements need not share the boundary's elevation.
            let lift = elevation - outline.elevation();
            let outline = if lift.abs() > TOLERANCE {
                outline.translated(&Vector3::new(0.0, 0.0, lift))
            } else {
                outline
            };

            let tool = kernel
                .extrude(&[outline], &basis_z(), UNIT_HEIGHT)
                .map_err(|e| self.failed(Some(id), e))?;
            let united = kernel.union_in_place(room, tool);
            kernel.release(tool);
            united.map_err(|e| self.failed(Some(id), e))?;
        }
        Ok(())
    }

    fn failed(&self, door: Option<ElementId>, source: GeometryError) -> RoomlineError {
        BoundaryError::MergeFailed {
            region: self.region,
            door,
            source,
        }
        .into()
    }
}
