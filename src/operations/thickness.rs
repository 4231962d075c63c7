use crate::document::Document;
use crate::error::{BoundaryError, LookupError, Result, RoomlineError};
use crate::model::{ElementId, WallConstruction};

/// Resolves the physical thickness of a bounding wall.
///
/// Solid walls report their stored width. Curtain walls report the largest
/// sectional thickness among the distinct mullion types on their grid, so
/// offsets derived from it never fall short of the thickest mullion.
#[derive(Debug, Clone, Copy)]
pub struct WallThickness {
    wall: ElementId,
}

impl WallThickness {
    /// Creates a new `WallThickness` operation.
    #[must_use]
    pub fn new(wall: ElementId) -> Self {
        Self { wall }
    }

    /// Executes the lookup against `document`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the wall, one of its mullions or a mullion
    /// type is missing, and [`BoundaryError::ThicknessUndetermined`] if a
    /// curtain wall has no mullions, a mullion type exposes no sectional
    /// dimension, or the resolved value is not positive.
    pub fn execute<D: Document>(&self, document: &D) -> Result<f64> {
        let wall = document.wall(self.wall).ok_or(LookupError::Wall(self.wall))?;

        let thickness = match &wall.construction {
            WallConstruction::Solid { width } => *width,
            WallConstruction::Curtain { mullions } => self.curtain_thickness(document, mullions)?,
        };

        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(self.undetermined(format!(
                "resolved thickness {thickness} is not positive"
            )));
        }
        Ok(thickness)
    }

    fn curtain_thickness<D: Document>(&self, document: &D, mullions: &[ElementId]) -> Result<f64> {
        if mullions.is_empty() {
            return Err(self.undetermined("curtain wall has no mullions".into()));
        }

        // Repeated mullions of one type count once.
        let mut type_ids: Vec<ElementId> = Vec::new();
        for &id in mullions {
            let mullion = document.mullion(id).ok_or(LookupError::Mullion(id))?;
            if !type_ids.contains(&mullion.type_id) {
                type_ids.push(mullion.type_id);
            }
        }

        let mut max = f64::NEG_INFINITY;
        for type_id in type_ids {
            let mullion_type = document
                .mullion_type(type_id)
                .ok_or(LookupError::MullionType(type_id))?;
            let thickness = mullion_type.profile.thickness().ok_or_else(|| {
                self.undetermined(format!(
                    "mullion type {type_id} exposes neither a thickness nor a radius"
                ))
            })?;
            max = max.max(thickness);
        }
        Ok(max)
    }

    fn undetermined(&self, reason: String) -> RoomlineError {
        BoundaryError::ThicknessUndetermined {
            wall: self.wall,
            reason,
        }
        .into()
    }
}
