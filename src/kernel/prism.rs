use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use slotmap::SlotMap;
use tracing::warn;

use crate::error::GeometryError;
use crate::geometry::{CurveLoop, CHORD_TOLERANCE};
use crate::math::polygon_2d::{polygon_self_intersects, remove_collinear, signed_area_2d};
use crate::math::{Point3, Vector3, POINT_TOLERANCE, TOLERANCE};

use super::offset::offset_curve_loop;
use super::{FaceSelector, GeometryKernel, SolidId};

/// Polygons smaller than this are treated as degenerate.
const MIN_AREA: f64 = 1e-10;

/// One closed ring of a profile, in i_overlay's point format.
type Contour = Vec<[f64; 2]>;

/// A vertical prism: a planar profile swept upwards by `height`.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// Elevation of the bottom face.
    pub elevation: f64,
    /// Distance between bottom and top faces.
    pub height: f64,
    /// Profile as shapes; each shape is an outer contour followed by holes.
    pub shapes: Vec<Vec<Contour>>,
}

/// Geometry kernel whose solids are vertical prisms over planar profiles.
///
/// Unions are computed on the profiles (`i_overlay`), which is exact for
/// prisms sharing base elevation and height and rejected otherwise.
#[derive(Debug, Default)]
pub struct PrismKernel {
    solids: SlotMap<SolidId, SolidData>,
}

impl PrismKernel {
    /// Creates a kernel with no solids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of solids currently alive.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Returns the solid's data.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SolidNotFound`] for an unknown id.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, GeometryError> {
        self.solids.get(id).ok_or(GeometryError::SolidNotFound)
    }
}

impl GeometryKernel for PrismKernel {
    fn offset_loop(
        &self,
        curve_loop: &CurveLoop,
        distances: &[f64],
        axis: &Vector3,
    ) -> Result<CurveLoop, GeometryError> {
        offset_curve_loop(curve_loop, distances, axis)
    }

    fn extrude(
        &mut self,
        loops: &[CurveLoop],
        axis: &Vector3,
        height: f64,
    ) -> Result<SolidId, GeometryError> {
        let axis_len = axis.norm();
        if axis_len < TOLERANCE {
            return Err(GeometryError::ZeroVector);
        }
        if (axis / axis_len - Vector3::z()).norm() > TOLERANCE {
            return Err(GeometryError::Unsupported(
                "prisms can only be extruded along +Z".into(),
            ));
        }
        if height < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "extrusion height {height} must be positive"
            )));
        }
        let Some(first) = loops.first() else {
            return Err(GeometryError::Degenerate("nothing to extrude".into()));
        };

        let elevation = first.elevation();
        let mut subject: Vec<Contour> = Vec::with_capacity(loops.len());
        for (index, curve_loop) in loops.iter().enumerate() {
            let polygon = remove_collinear(&curve_loop.tessellate(CHORD_TOLERANCE));
            if polygon.iter().any(|p| (p.z - elevation).abs() > POINT_TOLERANCE) {
                return Err(GeometryError::Unsupported(format!(
                    "loop {index} is not horizontal at elevation {elevation}"
                )));
            }
            if signed_area_2d(&polygon).abs() < MIN_AREA {
                return Err(GeometryError::Degenerate(format!("loop {index} has no area")));
            }
            if polygon_self_intersects(&polygon) {
                return Err(GeometryError::Degenerate(format!(
                    "loop {index} intersects itself"
                )));
            }
            subject.push(polygon.iter().map(|p| [p.x, p.y]).collect());
        }

        // Normalises the rings into shapes (outer + holes) under even-odd fill.
        let clip: Vec<Contour> = Vec::new();
        let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::EvenOdd);
        let shapes = snap_shapes(shapes, &subject);
        if shapes.is_empty() {
            return Err(GeometryError::Degenerate("profile encloses no area".into()));
        }

        Ok(self.solids.insert(SolidData {
            elevation,
            height,
            shapes,
        }))
    }

    fn union_in_place(&mut self, target: SolidId, tool: SolidId) -> Result<(), GeometryError> {
        let tool_data = self.solid(tool)?.clone();
        let target_data = self.solids.get_mut(target).ok_or(GeometryError::SolidNotFound)?;

        if (target_data.elevation - tool_data.elevation).abs() > POINT_TOLERANCE
            || (target_data.height - tool_data.height).abs() > POINT_TOLERANCE
        {
            return Err(GeometryError::Unsupported(format!(
                "union of prisms at different spans: [{}, +{}] and [{}, +{}]",
                target_data.elevation, target_data.height, tool_data.elevation, tool_data.height
            )));
        }

        let subject: Vec<Contour> = target_data.shapes.iter().flatten().cloned().collect();
        let clip: Vec<Contour> = tool_data.shapes.iter().flatten().cloned().collect();
        let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::EvenOdd);
        let inputs: Vec<Contour> = subject.into_iter().chain(clip).collect();
        let shapes = snap_shapes(shapes, &inputs);
        if shapes.is_empty() {
            return Err(GeometryError::Degenerate("union produced an empty solid".into()));
        }
        if shapes.len() > 1 {
            warn!(pieces = shapes.len(), "union produced disjoint pieces");
        }
        target_data.shapes = shapes;
        Ok(())
    }

    fn face_boundary(
        &self,
        solid: SolidId,
        face: FaceSelector,
    ) -> Result<Vec<CurveLoop>, GeometryError> {
        let data = self.solid(solid)?;
        let z = match face {
            FaceSelector::Bottom => data.elevation,
            FaceSelector::Top => data.elevation + data.height,
        };

        let mut shapes: Vec<(f64, Vec<CurveLoop>)> = Vec::with_capacity(data.shapes.len());
        for shape in &data.shapes {
            let mut loops = Vec::with_capacity(shape.len());
            let mut outer_area = 0.0;
            for (index, contour) in shape.iter().enumerate() {
                let points: Vec<Point3> =
                    contour.iter().map(|p| Point3::new(p[0], p[1], z)).collect();
                let mut points = remove_collinear(&points);
                let area = signed_area_2d(&points);
                if area.abs() < MIN_AREA {
                    continue;
                }
                // Outer contours run counter-clockwise, holes clockwise.
                let is_outer = index == 0;
                if (area > 0.0) != is_outer {
                    points.reverse();
                }
                if is_outer {
                    outer_area = area.abs();
                }
                loops.push(CurveLoop::from_points(&points)?);
            }
            if !loops.is_empty() {
                shapes.push((outer_area, loops));
            }
        }

        shapes.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(shapes.into_iter().flat_map(|(_, loops)| loops).collect())
    }

    fn release(&mut self, solid: SolidId) {
        self.solids.remove(solid);
    }
}

/// Moves overlay output back onto the input geometry.
///
/// i_overlay works on an integer grid, so every returned coordinate is off
/// by up to one grid step. A point within [`POINT_TOLERANCE`] of an input
/// vertex becomes that vertex; otherwise each coordinate snaps to a nearby
/// input coordinate, which restores crossings of axis-aligned edges.
/// Contours left with fewer than three distinct points are dropped.
fn snap_shapes(shapes: Vec<Vec<Contour>>, inputs: &[Contour]) -> Vec<Vec<Contour>> {
    let vertices: Vec<[f64; 2]> = inputs.iter().flatten().copied().collect();
    let nearest = |value: f64, axis: usize| {
        vertices
            .iter()
            .map(|v| v[axis])
            .filter(|c| (c - value).abs() < POINT_TOLERANCE)
            .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
            .unwrap_or(value)
    };
    let snap = |p: [f64; 2]| {
        let closest = vertices
            .iter()
            .map(|v| (v, (v[0] - p[0]).hypot(v[1] - p[1])))
            .filter(|(_, d)| *d < POINT_TOLERANCE)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        match closest {
            Some((v, _)) => *v,
            None => [nearest(p[0], 0), nearest(p[1], 1)],
        }
    };

    shapes
        .into_iter()
        .filter_map(|shape| {
            let mut contours = Vec::with_capacity(shape.len());
            for (index, contour) in shape.into_iter().enumerate() {
                let mut points: Contour = contour.into_iter().map(&snap).collect();
                points.dedup();
                if points.len() > 1 && points.first() == points.last() {
                    points.pop();
                }
                if points.len() >= 3 {
                    contours.push(points);
                } else if index == 0 {
                    return None;
                }
            }
            Some(contours)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> CurveLoop {
        CurveLoop::from_points(&[p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]).unwrap()
    }

    fn total_area(loops: &[CurveLoop]) -> f64 {
        loops.iter().map(CurveLoop::signed_area).sum()
    }

    #[test]
    fn extrude_and_read_back_square() {
        let mut kernel = PrismKernel::new();
        let solid = kernel.extrude(&[rect(0.0, 0.0, 10.0, 10.0)], &Vector3::z(), 1.0).unwrap();
        let loops = kernel.face_boundary(solid, FaceSelector::Bottom).unwrap();
        assert_eq!(loops.len(), 1);
        assert!(loops[0].same_shape(&rect(0.0, 0.0, 10.0, 10.0), 1e-9));
        let top = kernel.face_boundary(solid, FaceSelector::Top).unwrap();
        assert_relative_eq!(top[0].elevation(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn union_with_touching_notch() {
        let mut kernel = PrismKernel::new();
        let room = kernel.extrude(&[rect(0.0, 0.0, 10.0, 10.0)], &Vector3::z(), 1.0).unwrap();
        let door = kernel.extrude(&[rect(4.5, -0.2, 5.5, 0.0)], &Vector3::z(), 1.0).unwrap();
        kernel.union_in_place(room, door).unwrap();
        let loops = kernel.face_boundary(room, FaceSelector::Bottom).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 8);
        assert_relative_eq!(total_area(&loops), 100.2, epsilon = 1e-6);
    }

    #[test]
    fn union_keeps_input_coordinates_exactly() {
        let mut kernel = PrismKernel::new();
        let room = kernel.extrude(&[rect(0.0, 0.0, 10.0, 10.0)], &Vector3::z(), 1.0).unwrap();
        let door = kernel.extrude(&[rect(4.5, -0.2, 5.5, 0.0)], &Vector3::z(), 1.0).unwrap();
        kernel.union_in_place(room, door).unwrap();
        let loops = kernel.face_boundary(room, FaceSelector::Bottom).unwrap();

        let vertices = loops[0].vertices();
        for expected in [p(0.0, 0.0), p(10.0, 10.0), p(4.5, -0.2), p(5.5, 0.0)] {
            assert!(vertices.contains(&expected), "missing {expected:?}");
        }
        let y_min = vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min);
        assert_relative_eq!(y_min, -0.2, epsilon = 1e-15);
        assert_relative_eq!(total_area(&loops), 100.2, epsilon = 1e-12);
    }

    #[test]
    fn crossing_edges_snap_to_input_coordinates() {
        let mut kernel = PrismKernel::new();
        let room = kernel.extrude(&[rect(0.0, 0.0, 10.0, 10.0)], &Vector3::z(), 1.0).unwrap();
        let door = kernel.extrude(&[rect(4.5, -0.3, 5.5, 0.1)], &Vector3::z(), 1.0).unwrap();
        kernel.union_in_place(room, door).unwrap();
        let loops = kernel.face_boundary(room, FaceSelector::Bottom).unwrap();
        assert!(loops[0].vertices().contains(&p(4.5, 0.0)));
        assert_relative_eq!(total_area(&loops), 100.3, epsilon = 1e-12);
    }

    #[test]
    fn holes_survive_extrusion_and_union() {
        let mut kernel = PrismKernel::new();
        let hole: Vec<Point3> = rect(4.0, 4.0, 6.0, 6.0).vertices().into_iter().rev().collect();
        let room = kernel
            .extrude(
                &[rect(0.0, 0.0, 10.0, 10.0), CurveLoop::from_points(&hole).unwrap()],
                &Vector3::z(),
                1.0,
            )
            .unwrap();
        let door = kernel.extrude(&[rect(2.0, -0.2, 3.0, 0.0)], &Vector3::z(), 1.0).unwrap();
        kernel.union_in_place(room, door).unwrap();
        let loops = kernel.face_boundary(room, FaceSelector::Bottom).unwrap();
        assert_eq!(loops.len(), 2);
        assert!(loops[0].is_counter_clockwise());
        assert!(!loops[1].is_counter_clockwise());
        assert_relative_eq!(total_area(&loops), 100.2 - 4.0, epsilon = 1e-6);
    }

    #[test]
    fn union_rejects_different_spans() {
        let mut kernel = PrismKernel::new();
        let a = kernel.extrude(&[rect(0.0, 0.0, 1.0, 1.0)], &Vector3::z(), 1.0).unwrap();
        let b = kernel.extrude(&[rect(0.5, 0.0, 2.0, 1.0)], &Vector3::z(), 2.0).unwrap();
        assert!(matches!(
            kernel.union_in_place(a, b),
            Err(GeometryError::Unsupported(_))
        ));
    }

    #[test]
    fn extrude_rejects_self_intersecting_profile() {
        let mut kernel = PrismKernel::new();
        let bow_tie = CurveLoop::from_points(&[p(0.0, 0.0), p(2.0, 2.0), p(2.0, 0.0), p(0.0, 2.0)])
            .unwrap();
        assert!(kernel.extrude(&[bow_tie], &Vector3::z(), 1.0).is_err());
        assert_eq!(kernel.solid_count(), 0);
    }

    #[test]
    fn extrude_rejects_tilted_axis() {
        let mut kernel = PrismKernel::new();
        let axis = Vector3::new(1.0, 0.0, 1.0);
        assert!(kernel.extrude(&[rect(0.0, 0.0, 1.0, 1.0)], &axis, 1.0).is_err());
    }

    #[test]
    fn release_discards_solid() {
        let mut kernel = PrismKernel::new();
        let solid = kernel.extrude(&[rect(0.0, 0.0, 1.0, 1.0)], &Vector3::z(), 1.0).unwrap();
        kernel.release(solid);
        assert_eq!(kernel.solid_count(), 0);
        assert!(kernel.face_boundary(solid, FaceSelector::Bottom).is_err());
    }
}
