pub mod intersect_2d;
pub mod polygon_2d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Distance below which two points are treated as coincident.
///
/// Host geometry is reported in model units (feet or metres), so vertex
/// continuity is checked far more loosely than [`TOLERANCE`].
pub const POINT_TOLERANCE: f64 = 1e-6;

/// The vertical axis all extrusions and offsets are measured against.
#[must_use]
pub fn basis_z() -> Vector3 {
    Vector3::z()
}
