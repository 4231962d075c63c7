//! Shared fixtures for the operation tests: a 10×10 room bounded by four walls.

#![allow(clippy::unwrap_used)]

use crate::document::MemoryDocument;
use crate::geometry::{Line, Transform};
use crate::math::{Point3, Vector3};
use crate::model::{
    BoundarySegment, Door, DoorRooms, DoorType, ElementId, Mullion, MullionProfile, MullionType,
    Region, SegmentLoop, Wall, WallConstruction,
};

pub const ROOM: ElementId = ElementId(100);
pub const PHASE: ElementId = ElementId(2);
pub const DOOR_TYPE: ElementId = ElementId(500);

/// Walls of the bottom, right, top and left edges.
pub const WALLS: [ElementId; 4] = [ElementId(11), ElementId(12), ElementId(13), ElementId(14)];

pub fn square_loop(size: f64, walls: [ElementId; 4]) -> SegmentLoop {
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(size, 0.0, 0.0),
        Point3::new(size, size, 0.0),
        Point3::new(0.0, size, 0.0),
    ];
    (0..4)
        .map(|i| {
            let line = Line::new(pts[i], pts[(i + 1) % 4]).unwrap();
            BoundarySegment::new(line, Some(walls[i]))
        })
        .collect()
}

/// A 10×10 room whose four walls are solid and 0.2 thick.
pub fn square_room() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.add_region(
        Region {
            id: ROOM,
            level: ElementId(1),
            phase: PHASE,
            name: "Office".into(),
            number: "101".into(),
        },
        Some(vec![square_loop(10.0, WALLS)]),
    );
    for id in WALLS {
        doc.add_wall(solid_wall(id, 0.2));
    }
    doc.add_door_type(DoorType {
        id: DOOR_TYPE,
        width: Some(1.0),
    });
    doc
}

pub fn solid_wall(id: ElementId, width: f64) -> Wall {
    Wall {
        id,
        construction: WallConstruction::Solid { width },
    }
}

/// Adds (or replaces) a curtain wall whose mullions have the given profiles,
/// one mullion type per profile.
pub fn add_curtain_wall(doc: &mut MemoryDocument, id: ElementId, profiles: &[MullionProfile]) {
    let mut mullions = Vec::new();
    for (i, profile) in profiles.iter().enumerate() {
        let offset = i64::try_from(i).unwrap();
        let type_id = ElementId(id.0 * 100 + offset);
        let mullion_id = ElementId(id.0 * 1000 + offset);
        doc.add_mullion_type(MullionType {
            id: type_id,
            profile: *profile,
        });
        doc.add_mullion(Mullion {
            id: mullion_id,
            type_id,
        });
        mullions.push(mullion_id);
    }
    doc.add_wall(Wall {
        id,
        construction: WallConstruction::Curtain { mullions },
    });
}

/// A 1.0-wide door in the bottom wall, its origin on the wall centerline.
pub fn bottom_door(id: ElementId, facing: Vector3) -> Door {
    Door {
        id,
        type_id: DOOR_TYPE,
        host: WALLS[0],
        width: None,
        transform: Transform::translation(Point3::new(5.0, -0.1, 0.0)),
        facing,
        hand: Vector3::x(),
        has_bounding_box: true,
    }
}

/// Places `door` in the document with `ROOM` on the `to` side.
pub fn add_door_into_room(doc: &mut MemoryDocument, door: Door) {
    let id = door.id;
    doc.add_door(door);
    doc.set_door_rooms(
        id,
        PHASE,
        DoorRooms {
            from: None,
            to: Some(ROOM),
        },
    );
}
