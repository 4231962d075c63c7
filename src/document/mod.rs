mod memory;

pub use memory::{DoorRoomRecord, MemoryDocument, RegionRecord};

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::math::Point3;
use crate::model::{
    Door, DoorRooms, DoorType, ElementId, Mullion, MullionType, Region, SegmentLoop, Wall,
};

/// One face of a region's 3D geometry, as found by spatial analysis,
/// with the host elements of the boundary faces touching it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialFace {
    #[serde(default)]
    pub boundary_elements: Vec<ElementId>,
}

/// The host document as seen by the boundary core.
///
/// Every call is a blocking read (or, for the rename/renumber calls, a
/// write) against the host. Nothing is cached between calls. Implementations
/// need not be reentrant: callers serialize access to one document.
pub trait Document {
    /// Looks up a region.
    fn region(&self, id: ElementId) -> Option<Region>;

    /// Boundary loops of a region at its finish faces, loop 0 being the outer
    /// contour. Outer loops run counter-clockwise and inner loops clockwise
    /// about +Z when the host follows the usual convention; the core does not
    /// rely on it.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Unavailable`] when the host cannot compute the
    /// boundary for the region's current geometry.
    fn boundary_segments(&self, region: ElementId) -> Result<Vec<SegmentLoop>, HostError>;

    /// Looks up a wall. Returns `None` if the element is absent or not a wall.
    fn wall(&self, id: ElementId) -> Option<Wall>;

    /// Looks up a mullion instance.
    fn mullion(&self, id: ElementId) -> Option<Mullion>;

    /// Looks up a mullion type.
    fn mullion_type(&self, id: ElementId) -> Option<MullionType>;

    /// All door instances in the document, placed or not.
    fn doors(&self) -> Vec<Door>;

    /// Looks up a door type.
    fn door_type(&self, id: ElementId) -> Option<DoorType>;

    /// Regions on the from/to sides of a door at `phase`.
    fn door_rooms(&self, door: ElementId, phase: ElementId) -> DoorRooms;

    /// Returns `true` if `point` lies in the region's volume.
    fn is_point_in_region(&self, region: ElementId, point: &Point3) -> bool;

    /// Face analysis of the region's full 3D geometry.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Unavailable`] if the spatial calculation fails.
    fn spatial_faces(&self, region: ElementId) -> Result<Vec<SpatialFace>, HostError>;

    /// Sets the display name of a region.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NotFound`] if the region does not exist.
    fn set_region_name(&mut self, region: ElementId, name: &str) -> Result<(), HostError>;

    /// Sets the number of a region.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NotFound`] if the region does not exist.
    fn set_region_number(&mut self, region: ElementId, number: &str) -> Result<(), HostError>;
}
