//! Point-picking session for drill-core structure measurement.
//!
//! A [`TrioManager`] collects points picked on the virtual core and groups
//! them into trios of three. Each sealed trio gets its plane fitted and its
//! axial depth resolved using `coreorient-core`.
//!
//! ```
//! use coreorient_trio::{TrioManager, TrioError};
//! use nalgebra::Point3;
//!
//! let mut manager = TrioManager::default();
//! assert_eq!(
//!     manager.add_point(Point3::new(3.0, 0.0, 5.0)),
//!     Err(TrioError::SceneNotCaptured)
//! );
//!
//! manager.set_scene_captured(true);
//! for p in [
//!     Point3::new(3.0, 0.0, 5.0),
//!     Point3::new(-1.5, 2.6, 5.0),
//!     Point3::new(-1.5, -2.6, 5.0),
//! ] {
//!     manager.add_point(p).unwrap();
//! }
//! assert_eq!(manager.normal_trio_count(), 1);
//! // The first trio's depth comes from the operator.
//! assert!(!manager.first_trio_depth_supplied());
//! ```

mod error;
mod manager;
mod params;
mod trio;

pub use error::TrioError;
pub use manager::TrioManager;
pub use params::{TrioManagerParams, DEFAULT_PALETTE};
pub use trio::{DepthSource, PointAdded, PointTrio, TrioPlane, TrioState, TRIO_SIZE};
