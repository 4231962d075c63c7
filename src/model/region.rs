use serde::{Deserialize, Serialize};

use super::ElementId;

/// A bounded spatial area (a room).
///
/// Owned by the host document; the core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: ElementId,
    /// Level the region is placed on.
    pub level: ElementId,
    /// Phase used to resolve which doors bound the region.
    pub phase: ElementId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
}
