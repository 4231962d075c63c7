use serde::{Deserialize, Serialize};

use crate::geometry::Transform;
use crate::math::{Point3, Vector3};

use super::ElementId;

/// A door type; solid-wall doors take their width from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorType {
    pub id: ElementId,
    #[serde(default)]
    pub width: Option<f64>,
}

/// A door opening hosted by a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: ElementId,
    pub type_id: ElementId,
    /// Hosting wall.
    pub host: ElementId,
    /// Instance width; curtain-wall doors take their width from here.
    #[serde(default)]
    pub width: Option<f64>,
    pub transform: Transform,
    /// Direction the door faces, perpendicular to the host wall.
    pub facing: Vector3,
    /// In-plane lateral axis of the door.
    pub hand: Vector3,
    /// `false` for doors with no placed geometry in the current state.
    #[serde(default = "placed")]
    pub has_bounding_box: bool,
}

fn placed() -> bool {
    true
}

impl Door {
    /// World origin of the door placement.
    #[must_use]
    pub fn origin(&self) -> Point3 {
        self.transform.apply(&Point3::origin())
    }
}

/// Regions on either side of a door, evaluated at one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorRooms {
    #[serde(default)]
    pub from: Option<ElementId>,
    #[serde(default)]
    pub to: Option<ElementId>,
}
