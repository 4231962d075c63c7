use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::math::polygon_2d::{point_in_polygon_2d, point_on_polygon_boundary};
use crate::math::Point3;
use crate::model::{
    chain_segments, Door, DoorRooms, DoorType, ElementId, Mullion, MullionType, Region,
    SegmentLoop, Wall,
};

use super::{Document, SpatialFace};

/// A region together with the geometry the host would compute for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(flatten)]
    pub region: Region,
    /// `None` models a region whose boundary the host cannot compute.
    #[serde(default)]
    pub boundary: Option<Vec<SegmentLoop>>,
    /// `None` models a failing spatial calculation.
    #[serde(default)]
    pub spatial_faces: Option<Vec<SpatialFace>>,
}

/// From/to regions of one door at one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorRoomRecord {
    pub door: ElementId,
    pub phase: ElementId,
    #[serde(flatten)]
    pub rooms: DoorRooms,
}

/// An in-memory host document.
///
/// Deserialisable from JSON, and used as the reference host in tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryDocument {
    regions: Vec<RegionRecord>,
    walls: Vec<Wall>,
    mullions: Vec<Mullion>,
    mullion_types: Vec<MullionType>,
    door_types: Vec<DoorType>,
    doors: Vec<Door>,
    door_rooms: Vec<DoorRoomRecord>,
}

impl MemoryDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region with its boundary loops (`None` = not computable).
    pub fn add_region(&mut self, region: Region, boundary: Option<Vec<SegmentLoop>>) {
        self.regions.push(RegionRecord {
            region,
            boundary,
            spatial_faces: None,
        });
    }

    /// Sets the spatial analysis result of a region.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NotFound`] if the region does not exist.
    pub fn set_spatial_faces(
        &mut self,
        region: ElementId,
        faces: Vec<SpatialFace>,
    ) -> Result<(), HostError> {
        self.record_mut(region)?.spatial_faces = Some(faces);
        Ok(())
    }

    /// Adds a wall, replacing any wall with the same id.
    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.retain(|w| w.id != wall.id);
        self.walls.push(wall);
    }

    /// Adds a mullion instance.
    pub fn add_mullion(&mut self, mullion: Mullion) {
        self.mullions.push(mullion);
    }

    /// Adds a mullion type.
    pub fn add_mullion_type(&mut self, mullion_type: MullionType) {
        self.mullion_types.push(mullion_type);
    }

    /// Adds a door type.
    pub fn add_door_type(&mut self, door_type: DoorType) {
        self.door_types.push(door_type);
    }

    /// Adds a door instance.
    pub fn add_door(&mut self, door: Door) {
        self.doors.push(door);
    }

    /// Records the from/to regions of a door at a phase, replacing any
    /// earlier record for the same door and phase.
    pub fn set_door_rooms(&mut self, door: ElementId, phase: ElementId, rooms: DoorRooms) {
        self.door_rooms
            .retain(|r| !(r.door == door && r.phase == phase));
        self.door_rooms.push(DoorRoomRecord { door, phase, rooms });
    }

    /// All regions, in insertion order.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        self.regions.iter().map(|r| r.region.clone()).collect()
    }

    fn record(&self, region: ElementId) -> Option<&RegionRecord> {
        self.regions.iter().find(|r| r.region.id == region)
    }

    fn record_mut(&mut self, region: ElementId) -> Result<&mut RegionRecord, HostError> {
        self.regions
            .iter_mut()
            .find(|r| r.region.id == region)
            .ok_or(HostError::NotFound(region))
    }
}

impl Document for MemoryDocument {
    fn region(&self, id: ElementId) -> Option<Region> {
        self.record(id).map(|r| r.region.clone())
    }

    fn boundary_segments(&self, region: ElementId) -> Result<Vec<SegmentLoop>, HostError> {
        let record = self.record(region).ok_or(HostError::NotFound(region))?;
        record.boundary.clone().ok_or_else(|| {
            HostError::Unavailable(format!("no boundary segments for region {region}"))
        })
    }

    fn wall(&self, id: ElementId) -> Option<Wall> {
        self.walls.iter().find(|w| w.id == id).cloned()
    }

    fn mullion(&self, id: ElementId) -> Option<Mullion> {
        self.mullions.iter().find(|m| m.id == id).cloned()
    }

    fn mullion_type(&self, id: ElementId) -> Option<MullionType> {
        self.mullion_types.iter().find(|t| t.id == id).cloned()
    }

    fn doors(&self) -> Vec<Door> {
        self.doors.clone()
    }

    fn door_type(&self, id: ElementId) -> Option<DoorType> {
        self.door_types.iter().find(|t| t.id == id).cloned()
    }

    fn door_rooms(&self, door: ElementId, phase: ElementId) -> DoorRooms {
        self.door_rooms
            .iter()
            .find(|r| r.door == door && r.phase == phase)
            .map(|r| r.rooms)
            .unwrap_or_default()
    }

    /// Points on a boundary loop count as inside.
    fn is_point_in_region(&self, region: ElementId, point: &Point3) -> bool {
        let Some(loops) = self.record(region).and_then(|r| r.boundary.as_ref()) else {
            return false;
        };
        // A loop that does not chain leaves the outer/hole roles unknown.
        let Ok(polygons) = loops
            .iter()
            .map(|segments| chain_segments(segments).map(|l| l.outline()))
            .collect::<Result<Vec<_>, _>>()
        else {
            return false;
        };
        let Some((outer, holes)) = polygons.split_first() else {
            return false;
        };
        if polygons.iter().any(|p| point_on_polygon_boundary(point, p)) {
            return true;
        }
        point_in_polygon_2d(point, outer) && !holes.iter().any(|h| point_in_polygon_2d(point, h))
    }

    fn spatial_faces(&self, region: ElementId) -> Result<Vec<SpatialFace>, HostError> {
        let record = self.record(region).ok_or(HostError::NotFound(region))?;
        record.spatial_faces.clone().ok_or_else(|| {
            HostError::Unavailable(format!("spatial calculation failed for region {region}"))
        })
    }

    fn set_region_name(&mut self, region: ElementId, name: &str) -> Result<(), HostError> {
        name.clone_into(&mut self.record_mut(region)?.region.name);
        Ok(())
    }

    fn set_region_number(&mut self, region: ElementId, number: &str) -> Result<(), HostError> {
        number.clone_into(&mut self.record_mut(region)?.region.number);
        Ok(())
    }
}
