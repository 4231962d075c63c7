pub mod door;
pub mod region;
pub mod segment;
pub mod wall;

pub use door::{Door, DoorRooms, DoorType};
pub use region::Region;
pub use segment::{chain_segments, BoundarySegment, SegmentLoop};
pub use wall::{Mullion, MullionProfile, MullionType, Wall, WallConstruction, WallKind};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an element in the host document.
///
/// Regions, walls, doors, mullions, their types, levels and phases all share
/// one identity space, as they do in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
