mod boundary;
mod doors;
mod merge;
mod offset;
mod thickness;

#[cfg(test)]
pub(crate) mod test_support;

pub use boundary::{BoundaryElements, BoundaryLoops};
pub use doors::{BoundingDoors, DoorOutline, DoorsBounding};
pub use merge::{MergeBoundary, UNIT_HEIGHT};
pub use offset::OffsetLoop;
pub use thickness::WallThickness;
