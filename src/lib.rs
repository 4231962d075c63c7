//! Room boundary extraction for building models.
//!
//! Given a region of a host [`Document`](document::Document), [`Room`]
//! derives its boundary as closed curve loops, moves curtain-wall edges
//! inward by a configurable offset and optionally merges the region's door
//! openings into the footprint through a [`GeometryKernel`](kernel::GeometryKernel).

pub mod document;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod model;
pub mod operations;
pub mod options;
pub mod room;

pub use error::{Result, RoomlineError};
pub use options::{BoundaryOptions, DoorSelection, OffsetPolicy};
pub use room::Room;
