use coreorient_core::GeometryError;

/// Rejected [`crate::TrioManager`] operations.
///
/// A rejected operation leaves the manager unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TrioError {
    #[error("scene photo has not been captured")]
    SceneNotCaptured,
    #[error("the first trio needs a depth before more points can be picked")]
    FirstTrioDepthMissing,
    #[error("trio limit reached ({max} trios)")]
    TrioLimitReached { max: usize },
    #[error("validation trio limit reached ({max} trios)")]
    ValidationTrioLimitReached { max: usize },
    #[error("depth {depth_cm:.2} cm outside [0, {max_cm:.2}] cm (0 to {max_m:.3} m)")]
    DepthOutOfRange {
        depth_cm: f64,
        max_cm: f64,
        max_m: f64,
    },
    #[error("unknown trio {id}")]
    UnknownTrio { id: u32 },
    #[error("trio {id} is still being picked")]
    TrioIncomplete { id: u32 },
    #[error("trio {trio_id} has no point {point_id}")]
    UnknownPoint { trio_id: u32, point_id: u32 },
    #[error("trio {id} has no fitted plane")]
    NoPlane { id: u32 },
    #[error("trio {id} has no depth")]
    NoDepth { id: u32 },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
