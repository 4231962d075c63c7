use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vector3};

/// Placement of a host element: an origin and three orthonormal axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub origin: Point3,
    #[serde(default = "Vector3::x")]
    pub basis_x: Vector3,
    #[serde(default = "Vector3::y")]
    pub basis_y: Vector3,
    #[serde(default = "Vector3::z")]
    pub basis_z: Vector3,
}

impl Transform {
    /// Axis-aligned placement at `origin`.
    #[must_use]
    pub fn translation(origin: Point3) -> Self {
        Self {
            origin,
            basis_x: Vector3::x(),
            basis_y: Vector3::y(),
            basis_z: Vector3::z(),
        }
    }

    /// Maps a point from local coordinates into world coordinates.
    #[must_use]
    pub fn apply(&self, local: &Point3) -> Point3 {
        self.origin + self.basis_x * local.x + self.basis_y * local.y + self.basis_z * local.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_origin_maps_to_placement_origin() {
        let t = Transform::translation(Point3::new(4.0, 5.0, 1.0));
        assert_eq!(t.apply(&Point3::origin()), Point3::new(4.0, 5.0, 1.0));
    }

    #[test]
    fn rotated_basis_maps_local_axes() {
        let t = Transform {
            origin: Point3::origin(),
            basis_x: Vector3::y(),
            basis_y: -Vector3::x(),
            basis_z: Vector3::z(),
        };
        assert_eq!(t.apply(&Point3::new(1.0, 0.0, 0.0)), Point3::new(0.0, 1.0, 0.0));
    }
}
