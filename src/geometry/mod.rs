pub mod curve;
pub mod curve_loop;
pub mod transform;

pub use curve::{Arc, Curve, CurveDomain, CurveSegment, Line};
pub use curve_loop::{CurveLoop, CHORD_TOLERANCE};
pub use transform::Transform;
