use tracing::debug;

use crate::document::Document;
use crate::error::{LookupError, Result};
use crate::geometry::CurveLoop;
use crate::kernel::GeometryKernel;
use crate::model::{Door, ElementId, Region, SegmentLoop};
use crate::operations::{
    BoundaryElements, BoundaryLoops, BoundingDoors, DoorsBounding, MergeBoundary, OffsetLoop,
};
use crate::options::{BoundaryOptions, DoorSelection};

/// A read-only view of one region of a document.
///
/// The view holds a snapshot of the region's attributes; everything else
/// (boundaries, doors) is read from the document on every call.
#[derive(Debug)]
pub struct Room<'d, D: Document> {
    document: &'d D,
    region: Region,
}

impl<'d, D: Document> Room<'d, D> {
    /// Opens a view of region `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Region`] if the document has no such region.
    pub fn new(document: &'d D, id: ElementId) -> Result<Self> {
        let region = document.region(id).ok_or(LookupError::Region(id))?;
        Ok(Self { document, region })
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.region.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.region.name
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.region.number
    }

    #[must_use]
    pub fn level(&self) -> ElementId {
        self.region.level
    }

    #[must_use]
    pub fn phase(&self) -> ElementId {
        self.region.phase
    }

    /// Doors bounding the room at its phase, by side.
    #[must_use]
    pub fn bounding_doors(&self) -> BoundingDoors {
        DoorsBounding::new(self.region.id, self.region.phase).execute(self.document)
    }

    /// Doors with this room on their from side.
    #[must_use]
    pub fn from_doors(&self) -> Vec<Door> {
        self.bounding_doors().from
    }

    /// Doors with this room on their to side.
    #[must_use]
    pub fn to_doors(&self) -> Vec<Door> {
        self.bounding_doors().to
    }

    /// Doors bounding the room on either side, each listed once.
    #[must_use]
    pub fn doors(&self) -> Vec<Door> {
        self.bounding_doors().doors().into_iter().cloned().collect()
    }

    #[must_use]
    pub fn door_ids(&self) -> Vec<ElementId> {
        self.bounding_doors().door_ids()
    }

    /// Raw boundary loops as reported by the host.
    ///
    /// # Errors
    ///
    /// See [`BoundaryLoops::execute`].
    pub fn boundary_loops(&self) -> Result<Vec<SegmentLoop>> {
        BoundaryLoops::new(self.region.id).execute(self.document)
    }

    /// Bounding elements, falling back to spatial analysis if needed.
    ///
    /// # Errors
    ///
    /// See [`BoundaryElements::collect`].
    pub fn boundary_elements(&self) -> Result<BoundaryElements> {
        BoundaryElements::collect(self.document, self.region.id)
    }

    /// Computes the room boundary: raw loops, curtain-wall offsets, then
    /// the door merge selected by `options`.
    ///
    /// # Errors
    ///
    /// Fails with the first error of any stage; no partial result is
    /// returned. A [`BoundaryUnavailable`](crate::error::BoundaryError::BoundaryUnavailable)
    /// failure can be followed up with [`boundary_elements`](Self::boundary_elements).
    pub fn boundaries<K: GeometryKernel>(
        &self,
        kernel: &mut K,
        options: &BoundaryOptions,
    ) -> Result<Vec<CurveLoop>> {
        let raw = self.boundary_loops()?;
        let loops = raw
            .iter()
            .enumerate()
            .map(|(index, segments)| {
                OffsetLoop::new(self.region.id, index, segments, options.curtain_offset)
                    .execute(self.document, &*kernel)
            })
            .collect::<Result<Vec<_>>>()?;

        let doors = match &options.doors {
            DoorSelection::All => self.door_ids(),
            DoorSelection::Only(ids) => ids.clone(),
        };
        debug!(room = %self.region.id, doors = doors.len(), "computing boundaries");

        MergeBoundary::new(self.region.id, loops, doors)
            .depth(options.door_depth)
            .depth_ratio(options.door_depth_ratio)
            .execute(self.document, kernel)
    }
}
