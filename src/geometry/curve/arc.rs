use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Upper bound on chords produced when tessellating one arc.
const MAX_ARC_SUBDIVISIONS: u32 = 1024;

/// A circular arc in a horizontal plane.
///
/// The arc starts at `start_angle` (radians, measured from +X) and sweeps by
/// `sweep`: positive is counter-clockwise seen from +Z, negative clockwise.
/// The parameter `t ∈ [0, 1]` maps linearly onto the swept angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    center: Point3,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the radius is not positive or
    /// the sweep is zero or exceeds a full turn.
    pub fn new(
        center: Point3,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    ) -> Result<Self, GeometryError> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()));
        }
        if sweep.abs() < TOLERANCE || sweep.abs() > TAU + TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "arc sweep {sweep} must be non-zero and at most a full turn"
            )));
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the signed swept angle.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns `true` if the arc runs counter-clockwise about +Z.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.sweep > 0.0
    }

    fn point_at_angle(&self, angle: f64) -> Point3 {
        Point3::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
            self.center.z,
        )
    }

    /// Concentric offset by `distance` along `tangent × axis`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Unsupported`] for a non-vertical axis and
    /// [`GeometryError::Degenerate`] if the offset radius is not positive.
    pub fn offset(&self, distance: f64, axis: &Vector3) -> Result<Self, GeometryError> {
        if axis.z.abs() < TOLERANCE || axis.x.abs() > TOLERANCE || axis.y.abs() > TOLERANCE {
            return Err(GeometryError::Unsupported(
                "arcs can only be offset about the vertical axis".into(),
            ));
        }
        // tangent × +Z points away from the center on counter-clockwise arcs.
        let outward = self.sweep.signum() * axis.z.signum();
        let radius = self.radius + outward * distance;
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "arc of radius {} collapses under offset {distance}",
                self.radius
            )));
        }
        Ok(Self { radius, ..self.clone() })
    }

    /// Re-bounds the arc to run from `start` to `end` in the same rotational
    /// direction, keeping center and radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the new sweep vanishes.
    pub fn trimmed(&self, start: Point3, end: Point3) -> Result<Self, GeometryError> {
        let start_angle = (start.y - self.center.y).atan2(start.x - self.center.x);
        let end_angle = (end.y - self.center.y).atan2(end.x - self.center.x);
        let mut delta = end_angle - start_angle;
        if self.sweep > 0.0 {
            while delta <= 0.0 {
                delta += TAU;
            }
        } else {
            while delta >= 0.0 {
                delta -= TAU;
            }
        }
        // A full-turn arc trimmed to coincident points keeps its full sweep.
        if (delta.abs() - TAU).abs() < TOLERANCE && (self.sweep.abs() - TAU).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate("trimmed arc has no sweep".into()));
        }
        Self::new(self.center, self.radius, start_angle, delta)
    }

    /// Translates the arc by `delta`.
    #[must_use]
    pub fn translated(&self, delta: &Vector3) -> Self {
        Self {
            center: self.center + delta,
            ..self.clone()
        }
    }

    /// Points along the arc with chord deviation at most `chord_tolerance`.
    #[must_use]
    pub fn tessellate(&self, chord_tolerance: f64) -> Vec<Point3> {
        let count = self.subdivision_count(chord_tolerance);
        (0..=count)
            .map(|i| self.evaluate(f64::from(i) / f64::from(count)))
            .collect()
    }

    fn subdivision_count(&self, chord_tolerance: f64) -> u32 {
        let tol = chord_tolerance.clamp(TOLERANCE, self.radius);
        let max_step = 2.0 * (1.0 - tol / self.radius).acos();
        if max_step < TOLERANCE {
            return MAX_ARC_SUBDIVISIONS;
        }
        let steps = (self.sweep.abs() / max_step).ceil();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = steps as u32;
        steps.clamp(1, MAX_ARC_SUBDIVISIONS)
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Point3 {
        self.point_at_angle(self.start_angle + self.sweep * t)
    }

    fn tangent(&self, t: f64) -> Vector3 {
        let angle = self.start_angle + self.sweep * t;
        Vector3::new(-angle.sin(), angle.cos(), 0.0) * self.sweep.signum()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use approx::assert_relative_eq;

    fn quarter(ccw: bool) -> Arc {
        let sweep = if ccw { FRAC_PI_2 } else { -FRAC_PI_2 };
        Arc::new(Point3::origin(), 2.0, 0.0, sweep).unwrap()
    }

    #[test]
    fn rejects_degenerate_arcs() {
        assert!(Arc::new(Point3::origin(), 0.0, 0.0, PI).is_err());
        assert!(Arc::new(Point3::origin(), 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn end_points_follow_sweep() {
        let arc = quarter(true);
        assert_relative_eq!(arc.start_point().x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(arc.end_point().y, 2.0, epsilon = 1e-12);
        let cw = quarter(false);
        assert_relative_eq!(cw.end_point().y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn offset_grows_ccw_arc_outward() {
        let grown = quarter(true).offset(0.5, &Vector3::z()).unwrap();
        assert_relative_eq!(grown.radius(), 2.5, epsilon = 1e-12);
        let shrunk = quarter(false).offset(0.5, &Vector3::z()).unwrap();
        assert_relative_eq!(shrunk.radius(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn offset_past_center_collapses() {
        assert!(quarter(false).offset(2.5, &Vector3::z()).is_err());
    }

    #[test]
    fn trimming_keeps_direction() {
        let arc = quarter(true);
        let trimmed = arc
            .trimmed(Point3::new(0.0, -2.0, 0.0), Point3::new(0.0, 2.0, 0.0))
            .unwrap();
        assert_relative_eq!(trimmed.sweep(), PI, epsilon = 1e-12);
    }

    #[test]
    fn tessellation_respects_chord_tolerance() {
        let arc = quarter(true);
        let pts = arc.tessellate(1e-3);
        assert!(pts.len() > 3);
        for pair in pts.windows(2) {
            let mid = nalgebra::center(&pair[0], &pair[1]);
            let deviation = arc.radius() - mid.coords.xy().norm();
            assert!(deviation <= 1e-3 + 1e-12);
        }
    }
}
