use serde::{Deserialize, Serialize};

/// Failures of the pure geometry functions.
///
/// These are never fatal for a session: callers attach them to the trio or
/// plane they were computed for and keep it editable.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryError {
    #[error("points are collinear or coincident, no unique plane")]
    DegeneratePlane,
    #[error("plane is parallel to the core axis, no axis intersection")]
    NoAxisIntersection,
    #[error("non-finite numeric input")]
    InvalidNumericInput,
    #[error("BOH angle {angle:.2}° outside [70°, 110°]")]
    BohAngleOutOfRange { angle: f64 },
}
