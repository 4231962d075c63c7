mod offset;
mod prism;

pub use prism::{PrismKernel, SolidData};

use crate::error::GeometryError;
use crate::geometry::CurveLoop;
use crate::math::Vector3;

slotmap::new_key_type! {
    /// Handle of a solid owned by a geometry kernel.
    pub struct SolidId;
}

/// Which planar face of an extruded solid to read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSelector {
    /// The face at the base elevation.
    Bottom,
    /// The face at base elevation plus height.
    Top,
}

/// Geometry operations the boundary core delegates to the host kernel.
///
/// Solids live inside the kernel and are addressed by [`SolidId`]; callers
/// must [`release`](Self::release) every solid they create.
pub trait GeometryKernel {
    /// Offsets every curve of `curve_loop` by its own signed distance along
    /// `tangent × axis`, rejoining neighbours so the result stays closed.
    ///
    /// # Errors
    ///
    /// Fails if `distances` does not match the curve count or the offset
    /// geometry degenerates or self-intersects.
    fn offset_loop(
        &self,
        curve_loop: &CurveLoop,
        distances: &[f64],
        axis: &Vector3,
    ) -> Result<CurveLoop, GeometryError>;

    /// Extrudes a set of coplanar loops (first outer, others holes) along
    /// `axis` by `height`.
    ///
    /// # Errors
    ///
    /// Fails for empty, non-planar, degenerate or self-intersecting profiles.
    fn extrude(
        &mut self,
        loops: &[CurveLoop],
        axis: &Vector3,
        height: f64,
    ) -> Result<SolidId, GeometryError>;

    /// Replaces `target` with the union of `target` and `tool`.
    /// `tool` is left untouched.
    ///
    /// # Errors
    ///
    /// Fails if the kernel rejects the pair; `target` is unchanged then.
    fn union_in_place(&mut self, target: SolidId, tool: SolidId) -> Result<(), GeometryError>;

    /// Boundary loops of one horizontal face of a solid.
    ///
    /// # Errors
    ///
    /// Fails if the solid does not exist.
    fn face_boundary(
        &self,
        solid: SolidId,
        face: FaceSelector,
    ) -> Result<Vec<CurveLoop>, GeometryError>;

    /// Discards a solid. Releasing an unknown id is a no-op.
    fn release(&mut self, solid: SolidId);
}
