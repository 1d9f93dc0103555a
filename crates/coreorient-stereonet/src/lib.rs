//! Stereonet projection of structural orientations.
//!
//! Orientations are placed in their dip direction at the angular distance
//! `90° - plunge` from the center, where `plunge = 90° - dip`. Vertical
//! planes land on the primitive circle and horizontal planes at the center.
//!
//! ```
//! use coreorient_core::RealOrientation;
//! use coreorient_stereonet::{StereonetParams, StereonetProjector};
//!
//! let projector = StereonetProjector::new(StereonetParams::default()).unwrap();
//! let points = projector.project(&[RealOrientation { dip: 90.0, dip_direction: 90.0 }]);
//! assert!((points[0].x - 1.0).abs() < 1e-12);
//! ```

mod error;
mod grid;
mod params;
mod projector;

pub use error::StereonetError;
pub use grid::{GridCircle, GridLine, StereonetGrid};
pub use params::{Projection, StereonetParams};
pub use projector::{Stereonet, StereonetPoint, StereonetProjector};
