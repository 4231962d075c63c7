use serde::{Deserialize, Serialize};

use super::ElementId;

/// The two construction models a bounding wall can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallKind {
    Solid,
    Curtain,
}

/// Construction-specific wall data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WallConstruction {
    /// Single-material wall with one stored width.
    Solid { width: f64 },
    /// Mullion-gridded wall; holds the ids of the mullions on its grid.
    Curtain {
        #[serde(default)]
        mullions: Vec<ElementId>,
    },
}

/// A bounding wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: ElementId,
    pub construction: WallConstruction,
}

impl Wall {
    /// Returns the construction kind of the wall.
    #[must_use]
    pub fn kind(&self) -> WallKind {
        match self.construction {
            WallConstruction::Solid { .. } => WallKind::Solid,
            WallConstruction::Curtain { .. } => WallKind::Curtain,
        }
    }
}

/// One mullion instance placed on a curtain grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mullion {
    pub id: ElementId,
    pub type_id: ElementId,
}

/// Cross-section of a mullion type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MullionProfile {
    Rectangular { thickness: f64 },
    Circular { radius: f64 },
    /// The type exposes no sectional dimension (e.g. a custom profile).
    Unspecified,
}

impl MullionProfile {
    /// Sectional thickness: the rectangle's thickness or the circle's diameter.
    #[must_use]
    pub fn thickness(&self) -> Option<f64> {
        match *self {
            Self::Rectangular { thickness } => Some(thickness),
            Self::Circular { radius } => Some(radius * 2.0),
            Self::Unspecified => None,
        }
    }
}

/// A mullion type shared by many mullion instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MullionType {
    pub id: ElementId,
    pub profile: MullionProfile,
}
