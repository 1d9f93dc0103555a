//! Per-structure results of a picking session.

use coreorient_core::{
    local_angles, project_along_hole, true_orientation, BohReference, Collar,
    DrillHoleOrientation, LocalAngles, RealOrientation, SpatialCoordinates,
};
use coreorient_stereonet::{Stereonet, StereonetProjector};
use coreorient_trio::TrioManager;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Collar position and orientation of the hole the core came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillHole {
    pub collar: Collar,
    pub orientation: DrillHoleOrientation,
}

/// One measured structure in the map frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub trio_id: u32,
    pub color: String,
    pub depth_cm: f64,
    pub depth_m: f64,
    /// BOH line angle that applied at this depth.
    pub boh_angle: f64,
    pub local: LocalAngles,
    pub orientation: RealOrientation,
    pub position: SpatialCoordinates,
}

/// A normal trio left out of the report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedTrio {
    pub trio_id: u32,
    pub reason: String,
}

/// Structures of every normal trio that has a plane and a depth.
///
/// Validation trios are never reported. Trios that cannot be reported are
/// listed in the second vector with the reason.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
pub fn build_structure_reports(
    manager: &TrioManager,
    boh: &BohReference,
    hole: &DrillHole,
) -> (Vec<StructureReport>, Vec<SkippedTrio>) {
    let mut reports = Vec::new();
    let mut skipped = Vec::new();

    for trio in manager.normal_trios() {
        let skip = |reason: String| SkippedTrio {
            trio_id: trio.id,
            reason,
        };
        let (Some(plane), Some(depth_cm)) = (trio.plane, trio.depth) else {
            let reason = match trio.geometry_error {
                Some(err) => err.to_string(),
                None if trio.plane.is_none() => "no plane".to_string(),
                None => "no depth".to_string(),
            };
            debug!("trio {} not reported: {reason}", trio.id);
            skipped.push(skip(reason));
            continue;
        };

        let boh_angle = boh.angle_for_depth(depth_cm);
        let result = local_angles(&plane.normal, boh_angle).and_then(|local| {
            let orientation = true_orientation(local, boh_angle, &hole.orientation)?;
            Ok((local, orientation))
        });
        match result {
            Ok((local, orientation)) => {
                let depth_m = depth_cm / 100.0;
                reports.push(StructureReport {
                    trio_id: trio.id,
                    color: trio.color.clone(),
                    depth_cm,
                    depth_m,
                    boh_angle,
                    local,
                    orientation,
                    position: project_along_hole(&hole.collar, &hole.orientation, depth_m),
                });
            }
            Err(err) => {
                warn!("trio {}: {err}", trio.id);
                skipped.push(skip(err.to_string()));
            }
        }
    }
    (reports, skipped)
}

/// Stereonet of the reported structures.
pub fn structure_stereonet(
    projector: &StereonetProjector,
    structures: &[StructureReport],
) -> Stereonet {
    let orientations: Vec<RealOrientation> = structures.iter().map(|s| s.orientation).collect();
    projector.plot(&orientations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Point3;

    fn level_points(z: f64) -> [Point3<f64>; 3] {
        [
            Point3::new(3.0, 0.0, z),
            Point3::new(-1.5, 2.6, z),
            Point3::new(-1.5, -2.6, z),
        ]
    }

    fn manager_with_first_trio(depth_cm: f64) -> TrioManager {
        let mut manager = TrioManager::default();
        manager.set_scene_captured(true);
        for p in level_points(4.0) {
            manager.add_point(p).expect("pick");
        }
        manager.set_trio_depth(0, depth_cm, 100_000.0).expect("depth");
        manager
    }

    #[test]
    fn level_plane_in_vertical_hole_has_vertical_normal() {
        let manager = manager_with_first_trio(250.0);
        let hole = DrillHole {
            collar: SpatialCoordinates::new(100.0, 200.0, 50.0),
            orientation: DrillHoleOrientation {
                azimuth: 0.0,
                dip: -90.0,
            },
        };
        let boh = BohReference::default();
        let (reports, skipped) = build_structure_reports(&manager, &boh, &hole);
        assert!(skipped.is_empty());
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        // dip is asin(|N_z|) of the map-frame normal
        assert_abs_diff_eq!(report.orientation.dip, 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.depth_m, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(report.position.elevation, 47.5, epsilon = 1e-9);
        assert_abs_diff_eq!(report.position.east, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn validation_and_incomplete_trios_are_not_reported() {
        let mut manager = TrioManager::default();
        manager.set_scene_captured(true);
        for p in level_points(4.0) {
            manager.add_point(p).expect("pick");
        }
        manager
            .create_validation_trio(30.0, 40.0, 10.0, 90.0)
            .expect("validation trio");

        let (reports, skipped) =
            build_structure_reports(&manager, &BohReference::default(), &DrillHole::default());
        assert!(reports.is_empty());
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].reason, "no depth");
    }
}
