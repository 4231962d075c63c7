use thiserror::Error;

use crate::model::ElementId;

/// Top-level error type for room boundary extraction.
#[derive(Debug, Error)]
pub enum RoomlineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("curve loop is not closed: gap of {gap} after curve {index}")]
    LoopNotClosed { index: usize, gap: f64 },

    #[error("unsupported by the geometry kernel: {0}")]
    Unsupported(String),

    #[error("solid not found in the geometry kernel")]
    SolidNotFound,
}

/// An element the core asked the document for does not exist.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("region {0} not found")]
    Region(ElementId),

    #[error("element {0} is not a wall")]
    Wall(ElementId),

    #[error("mullion {0} not found")]
    Mullion(ElementId),

    #[error("mullion type {0} not found")]
    MullionType(ElementId),
}

/// Failures reported by the host document itself.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host cannot compute the requested data: {0}")]
    Unavailable(String),

    #[error("element {0} not found in the document")]
    NotFound(ElementId),
}

/// Failures of the boundary pipeline itself.
///
/// Each variant names the region (and wall or door) involved so the caller
/// can decide whether to retry with relaxed parameters or skip the region.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("boundary of region {region} is unavailable: {reason}")]
    BoundaryUnavailable { region: ElementId, reason: String },

    #[error("thickness of wall {wall} cannot be determined: {reason}")]
    ThicknessUndetermined { wall: ElementId, reason: String },

    #[error("offset of loop {loop_index} of region {region} failed: {source}")]
    OffsetFailed {
        region: ElementId,
        loop_index: usize,
        #[source]
        source: GeometryError,
    },

    #[error("merging door {door:?} into region {region} failed: {source}")]
    MergeFailed {
        region: ElementId,
        door: Option<ElementId>,
        #[source]
        source: GeometryError,
    },
}

/// Convenience type alias for results using [`RoomlineError`].
pub type Result<T> = std::result::Result<T, RoomlineError>;
