#![allow(dead_code, clippy::unwrap_used)]

use roomline::document::MemoryDocument;
use roomline::geometry::{Line, Transform};
use roomline::math::{Point3, Vector3};
use roomline::model::{
    BoundarySegment, Door, DoorRooms, DoorType, ElementId, Mullion, MullionProfile, MullionType,
    Region, SegmentLoop, Wall, WallConstruction,
};

pub const ROOM: ElementId = ElementId(100);
pub const NEIGHBOUR: ElementId = ElementId(101);
pub const PHASE: ElementId = ElementId(2);
pub const DOOR_TYPE: ElementId = ElementId(500);

/// Builds test documents around one rectangular room.
///
/// The room spans `[0, width] × [0, depth]` at elevation 0. Its four walls
/// (bottom, right, top, left) are solid and `wall_width` thick until
/// replaced, and the boundary reported by the host runs along their faces.
pub struct Fixture {
    pub doc: MemoryDocument,
    pub walls: [ElementId; 4],
    width: f64,
    wall_width: f64,
}

impl Fixture {
    pub fn rectangle(width: f64, depth: f64, wall_width: f64) -> Self {
        let walls = [ElementId(11), ElementId(12), ElementId(13), ElementId(14)];
        let mut doc = MemoryDocument::new();
        doc.add_region(
            Region {
                id: ROOM,
                level: ElementId(1),
                phase: PHASE,
                name: "Studio".into(),
                number: "1.01".into(),
            },
            Some(vec![rectangle_loop(width, depth, walls)]),
        );
        for id in walls {
            doc.add_wall(Wall {
                id,
                construction: WallConstruction::Solid { width: wall_width },
            });
        }
        doc.add_door_type(DoorType {
            id: DOOR_TYPE,
            width: Some(1.0),
        });
        Self {
            doc,
            walls,
            width,
            wall_width,
        }
    }

    pub fn square() -> Self {
        Self::rectangle(10.0, 10.0, 0.2)
    }

    /// Turns wall `index` into a curtain wall with one mullion per profile.
    pub fn curtain(mut self, index: usize, profiles: &[MullionProfile]) -> Self {
        let wall = self.walls[index];
        let mut mullions = Vec::new();
        for (i, profile) in profiles.iter().enumerate() {
            let n = i64::try_from(i).unwrap();
            let type_id = ElementId(wall.0 * 100 + n);
            let id = ElementId(wall.0 * 1000 + n);
            self.doc.add_mullion_type(MullionType {
                id: type_id,
                profile: *profile,
            });
            self.doc.add_mullion(Mullion { id, type_id });
            mullions.push(id);
        }
        self.doc.add_wall(Wall {
            id: wall,
            construction: WallConstruction::Curtain { mullions },
        });
        self
    }

    /// Places a 1.0-wide door centred in the bottom wall, leading from the
    /// room to `NEIGHBOUR`.
    pub fn bottom_door(self, id: ElementId, facing: Vector3) -> Self {
        let origin = Point3::new(self.width / 2.0, -self.wall_width / 2.0, 0.0);
        self.bottom_door_at(id, origin, facing)
    }

    /// Like [`Fixture::bottom_door`], with an explicit door origin.
    pub fn bottom_door_at(mut self, id: ElementId, origin: Point3, facing: Vector3) -> Self {
        let door = Door {
            id,
            type_id: DOOR_TYPE,
            host: self.walls[0],
            width: Some(1.0),
            transform: Transform::translation(origin),
            facing,
            hand: Vector3::x(),
            has_bounding_box: true,
        };
        self.doc.add_door(door);
        self.doc.set_door_rooms(
            id,
            PHASE,
            DoorRooms {
                from: Some(ROOM),
                to: Some(NEIGHBOUR),
            },
        );
        self
    }
}

pub fn rectangle_loop(width: f64, depth: f64, walls: [ElementId; 4]) -> SegmentLoop {
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(width, 0.0, 0.0),
        Point3::new(width, depth, 0.0),
        Point3::new(0.0, depth, 0.0),
    ];
    (0..4)
        .map(|i| {
            let line = Line::new(pts[i], pts[(i + 1) % 4]).unwrap();
            BoundarySegment::new(line, Some(walls[i]))
        })
        .collect()
}

/// Axis-aligned bounds `(min_x, max_x, min_y, max_y)` of some points.
pub fn bounds(points: &[Point3]) -> (f64, f64, f64, f64) {
    points.iter().fold(
        (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ),
        |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
    )
}
