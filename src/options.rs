use serde::{Deserialize, Serialize};

use crate::math::TOLERANCE;
use crate::model::ElementId;

/// How far curtain-wall boundary segments are moved towards the room interior.
///
/// Segments of any other wall kind are never offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPolicy {
    /// Half of each curtain wall's resolved thickness, inward.
    #[default]
    HalfThickness,
    /// No offset; the boundary follows the curtain wall centerline.
    Zero,
    /// Explicit distance for every curtain segment. Positive moves inward.
    Distance(f64),
}

impl OffsetPolicy {
    /// Returns `true` if the policy never displaces a segment.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Zero => true,
            Self::Distance(d) => d.abs() < TOLERANCE,
            Self::HalfThickness => false,
        }
    }
}

/// Which doors are merged into the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorSelection {
    /// Every door bounding the region on either side.
    #[default]
    All,
    /// An explicit list. An empty list disables merging.
    Only(Vec<ElementId>),
}

/// Parameters of [`Room::boundaries`](crate::Room::boundaries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryOptions {
    pub curtain_offset: OffsetPolicy,
    pub doors: DoorSelection,
    /// Depth of the door outlines; zero or negative means wall thickness.
    pub door_depth: f64,
    /// Scales `door_depth` when strictly between 0 and 1.
    pub door_depth_ratio: f64,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            curtain_offset: OffsetPolicy::default(),
            doors: DoorSelection::default(),
            door_depth: 0.0,
            door_depth_ratio: 0.5,
        }
    }
}

impl BoundaryOptions {
    /// Options that leave door openings out of the boundary.
    #[must_use]
    pub fn without_doors() -> Self {
        Self {
            doors: DoorSelection::Only(Vec::new()),
            ..Self::default()
        }
    }
}
