//! Core geometry for reconstructing structural orientations from drill core.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about point picking sessions or plotting: those live in `coreorient-trio`
//! and `coreorient-stereonet`.
//!
//! Coordinate frames:
//! - **core frame**: centimeters, `z` along the core axis, `x`/`y` across the
//!   section. Surface azimuth `0°` is `+x`, `90°` is `+y`.
//! - **map frame**: meters, `x` east, `y` north, `z` up.
//!
//! ## Quickstart
//!
//! ```
//! use coreorient_core::{
//!     fit_plane, local_angles, resolve_axis_depth, validation_points, LocalAngles,
//! };
//!
//! let angles = LocalAngles { alpha: 35.0, beta: 120.0 };
//! let points = validation_points(angles, 12.0, 90.0, 3.175).unwrap();
//! let plane = fit_plane(&points).unwrap();
//!
//! let depth = resolve_axis_depth(&plane).unwrap();
//! let recovered = local_angles(&plane.normal, 90.0).unwrap();
//! assert!((depth - 12.0).abs() < 1e-9);
//! assert!((recovered.alpha - 35.0).abs() < 1e-6);
//! ```

mod angles;
mod error;
mod geospatial;
mod logger;
mod outline;
mod plane;
mod point;
mod trajectory;

pub use angles::{
    local_angles, local_normal, validation_points, wrap_degrees, BohReference, LocalAngles,
    BOH_ANGLE_MAX, BOH_ANGLE_MIN, VALIDATION_AZIMUTHS_DEG,
};
pub use error::GeometryError;
pub use geospatial::{
    orientation_from_global_normal, true_orientation, DrillHoleOrientation, RealOrientation,
};
pub use outline::plane_cylinder_outline;
pub use plane::{fit_plane, fit_picked_points, resolve_axis_depth, PlaneEquation};
pub use point::{CoreGeometry, PickedPoint};
pub use trajectory::{project_along_hole, Collar, SpatialCoordinates};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{default_filter, init_with_level, level_from_verbosity};
