use tracing::debug;

use crate::document::Document;
use crate::error::{GeometryError, Result};
use crate::geometry::{CurveLoop, Line};
use crate::math::{basis_z, Vector3, TOLERANCE};
use crate::model::{Door, ElementId, WallConstruction};
use crate::operations::WallThickness;

/// Builds the horizontal rectangular footprint of one door opening.
///
/// The rectangle spans the door width along the door's hand axis and the
/// effective depth across the wall. Without a depth it fills the wall
/// thickness; a partial depth sits against the region's side of the wall.
#[derive(Debug, Clone, Copy)]
pub struct DoorOutline<'a> {
    region: ElementId,
    door: &'a Door,
    depth: f64,
    depth_ratio: f64,
}

impl<'a> DoorOutline<'a> {
    /// Creates a new `DoorOutline` operation for `door` as seen from `region`.
    ///
    /// A `depth` of zero or less means the host wall's thickness. A
    /// `depth_ratio` strictly between 0 and 1 scales the depth; any other
    /// ratio is ignored.
    #[must_use]
    pub fn new(region: ElementId, door: &'a Door, depth: f64, depth_ratio: f64) -> Self {
        Self {
            region,
            door,
            depth,
            depth_ratio,
        }
    }

    /// Executes the construction.
    ///
    /// Returns `Ok(None)` when the door width cannot be resolved: the door
    /// is then left out of any merge.
    ///
    /// # Errors
    ///
    /// Propagates [`WallThickness`] errors for the host wall and returns
    /// [`GeometryError`] if the door's orientation vectors are degenerate.
    pub fn execute<D: Document>(&self, document: &D) -> Result<Option<CurveLoop>> {
        let door = self.door;
        let Some(wall) = document.wall(door.host) else {
            debug!(door = %door.id, host = %door.host, "door is not hosted by a wall, skipping");
            return Ok(None);
        };

        let width = match wall.construction {
            WallConstruction::Solid { .. } => {
                document.door_type(door.type_id).and_then(|t| t.width)
            }
            WallConstruction::Curtain { .. } => door.width,
        };
        let Some(width) = width.filter(|w| *w > TOLERANCE) else {
            debug!(door = %door.id, "door width unavailable, skipping");
            return Ok(None);
        };

        let thickness = WallThickness::new(wall.id).execute(document)?;
        let origin = door.origin();
        let facing = horizontal_unit(&door.facing)?;

        let probe = origin + facing * (thickness / 2.0);
        let inward = if document.is_point_in_region(self.region, &probe) {
            facing
        } else {
            -facing
        };

        let mut depth = if self.depth <= 0.0 { thickness } else { self.depth };
        if self.depth_ratio > 0.0 && self.depth_ratio < 1.0 {
            depth *= self.depth_ratio;
        }

        let center = if (depth - thickness).abs() > TOLERANCE {
            origin + inward * ((thickness - depth) / 2.0)
        } else {
            origin
        };

        let half_width = horizontal_unit(&door.hand)? * (width / 2.0);
        let line = Line::new(center + half_width, center - half_width)?;
        let outline = CurveLoop::thicken(&line, depth, &basis_z())?;
        debug!(door = %door.id, width, depth, "built door outline");
        Ok(Some(outline))
    }
}

fn horizontal_unit(v: &Vector3) -> std::result::Result<Vector3, GeometryError> {
    let flat = Vector3::new(v.x, v.y, 0.0);
    let len = flat.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector);
    }
    Ok(flat / len)
}
