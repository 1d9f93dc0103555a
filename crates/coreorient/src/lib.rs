//! High-level facade for the `coreorient-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry, picking and stereonet crates
//! - structure reports (true dip / dip direction and map position per trio)
//! - JSON session configs that replay a picking session into a report
//! - the `coreorient` command-line tool (feature `cli`)
//!
//! ## Quickstart
//!
//! ```
//! use coreorient::{run_session, SessionConfig, TrioInput};
//! use nalgebra::Point3;
//!
//! let config = SessionConfig {
//!     trios: vec![TrioInput {
//!         points: vec![
//!             Point3::new(3.0, 0.0, 6.0),
//!             Point3::new(-1.5, 2.6, 4.0),
//!             Point3::new(-1.5, -2.6, 5.0),
//!         ],
//!         depth_cm: Some(5.0),
//!     }],
//!     ..SessionConfig::default()
//! };
//! let report = run_session(&config, "session.json".as_ref()).unwrap();
//! assert_eq!(report.structures.len(), 1);
//! ```
//!
//! ## API map
//! - `coreorient::core`: plane fitting, axis depth, local and true orientation.
//! - `coreorient::trio`: the point-picking state machine.
//! - `coreorient::stereonet`: equal-area / equal-angle projection.

pub use coreorient_core as core;
pub use coreorient_stereonet as stereonet;
pub use coreorient_trio as trio;

pub use coreorient_core::{
    BohReference, Collar, DrillHoleOrientation, GeometryError, LocalAngles, RealOrientation,
    SpatialCoordinates,
};
pub use coreorient_stereonet::{Projection, Stereonet, StereonetParams, StereonetProjector};
pub use coreorient_trio::{TrioError, TrioManager, TrioManagerParams};

mod io;
mod report;
mod roundtrip;
mod session;

pub use io::{
    SessionConfig, SessionIoError, SessionReport, TrioInput, ValidationInput, ValidationReport,
};
pub use report::{
    build_structure_reports, structure_stereonet, DrillHole, SkippedTrio, StructureReport,
};
pub use roundtrip::{
    azimuth_difference, local_angle_round_trip, RoundTrip, ROUND_TRIP_TOLERANCE_DEG,
};
pub use session::{
    check_validation_trios, replay_session, run_session, run_session_file, SessionError,
};
