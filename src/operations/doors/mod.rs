mod association;
mod outline;

pub use association::{BoundingDoors, DoorsBounding};
pub use outline::DoorOutline;
