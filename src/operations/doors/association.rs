use crate::document::Document;
use crate::model::{Door, ElementId};

/// Doors bounding one region, split by the side the region is on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingDoors {
    /// Doors whose from-room is the region.
    pub from: Vec<Door>,
    /// Doors whose to-room is the region.
    pub to: Vec<Door>,
}

impl BoundingDoors {
    /// Union of `from` and `to`. A door reported on both sides is listed once.
    #[must_use]
    pub fn doors(&self) -> Vec<&Door> {
        let mut doors: Vec<&Door> = Vec::with_capacity(self.from.len() + self.to.len());
        for door in self.from.iter().chain(&self.to) {
            if !doors.iter().any(|d| d.id == door.id) {
                doors.push(door);
            }
        }
        doors
    }

    /// Identities of [`doors`](Self::doors), in the same order.
    #[must_use]
    pub fn door_ids(&self) -> Vec<ElementId> {
        self.doors().into_iter().map(|d| d.id).collect()
    }

    /// Returns `true` if `door` bounds the region on either side.
    #[must_use]
    pub fn contains(&self, door: ElementId) -> bool {
        self.from.iter().chain(&self.to).any(|d| d.id == door)
    }

    /// Looks up a bounding door by id.
    #[must_use]
    pub fn get(&self, door: ElementId) -> Option<&Door> {
        self.from.iter().chain(&self.to).find(|d| d.id == door)
    }
}

/// Finds the doors that have a region on their from or to side at a phase.
///
/// Doors without placed geometry are ignored. The host's room assignment is
/// taken as is: a door reporting the region on both sides shows up in both
/// lists.
#[derive(Debug, Clone, Copy)]
pub struct DoorsBounding {
    region: ElementId,
    phase: ElementId,
}

impl DoorsBounding {
    /// Creates a new `DoorsBounding` query.
    #[must_use]
    pub fn new(region: ElementId, phase: ElementId) -> Self {
        Self { region, phase }
    }

    /// Executes the query against `document`.
    #[must_use]
    pub fn execute<D: Document>(&self, document: &D) -> BoundingDoors {
        let mut result = BoundingDoors::default();
        for door in document.doors() {
            if !door.has_bounding_box {
                continue;
            }
            let rooms = document.door_rooms(door.id, self.phase);
            let from = rooms.from == Some(self.region);
            let to = rooms.to == Some(self.region);
            match (from, to) {
                (true, true) => {
                    result.from.push(door.clone());
                    result.to.push(door);
                }
                (true, false) => result.from.push(door),
                (false, true) => result.to.push(door),
                (false, false) => {}
            }
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::model::DoorRooms;
    use crate::operations::test_support::{bottom_door, square_room, PHASE, ROOM};

    #[test]
    fn door_lands_on_the_matching_side_only() {
        let mut doc = square_room();
        let door = bottom_door(ElementId(1), Vector3::y());
        doc.add_door(door);
        doc.set_door_rooms(
            ElementId(1),
            PHASE,
            DoorRooms {
                from: Some(ElementId(200)),
                to: Some(ROOM),
            },
        );

        let doors = DoorsBounding::new(ROOM, PHASE).execute(&doc);
        assert!(doors.from.is_empty());
        assert_eq!(doors.to.len(), 1);
        assert_eq!(doors.door_ids(), vec![ElementId(1)]);

        let other = DoorsBounding::new(ElementId(200), PHASE).execute(&doc);
        assert_eq!(other.from.len(), 1);
        assert!(other.to.is_empty());
    }

    #[test]
    fn unplaced_doors_are_ignored() {
        let mut doc = square_room();
        let mut door = bottom_door(ElementId(1), Vector3::y());
        door.has_bounding_box = false;
        doc.add_door(door);
        doc.set_door_rooms(
            ElementId(1),
            PHASE,
            DoorRooms {
                from: Some(ROOM),
                to: None,
            },
        );
        assert!(DoorsBounding::new(ROOM, PHASE).execute(&doc).doors().is_empty());
    }

    #[test]
    fn other_phases_do_not_count() {
        let mut doc = square_room();
        doc.add_door(bottom_door(ElementId(1), Vector3::y()));
        doc.set_door_rooms(
            ElementId(1),
            ElementId(77),
            DoorRooms {
                from: Some(ROOM),
                to: None,
            },
        );
        assert!(DoorsBounding::new(ROOM, PHASE).execute(&doc).doors().is_empty());
    }

    #[test]
    fn same_region_on_both_sides_is_reported_twice_but_listed_once() {
        let mut doc = square_room();
        doc.add_door(bottom_door(ElementId(1), Vector3::y()));
        doc.set_door_rooms(
            ElementId(1),
            PHASE,
            DoorRooms {
                from: Some(ROOM),
                to: Some(ROOM),
            },
        );
        let doors = DoorsBounding::new(ROOM, PHASE).execute(&doc);
        assert_eq!(doors.from.len(), 1);
        assert_eq!(doors.to.len(), 1);
        assert_eq!(doors.door_ids(), vec![ElementId(1)]);
        assert!(doors.contains(ElementId(1)));
    }
}
