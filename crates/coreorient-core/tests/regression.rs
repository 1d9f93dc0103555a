use approx::assert_abs_diff_eq;
use coreorient_core::{
    fit_plane, local_angles, project_along_hole, resolve_axis_depth, true_orientation,
    validation_points, BohReference, DrillHoleOrientation, LocalAngles, SpatialCoordinates,
};

const RADIUS_CM: f64 = 3.175;

/// Picked points -> plane -> depth -> local angles -> true orientation.
fn measure(
    angles: LocalAngles,
    depth_cm: f64,
    boh: &BohReference,
    hole: &DrillHoleOrientation,
) -> (f64, LocalAngles, coreorient_core::RealOrientation) {
    let boh_angle = boh.angle_for_depth(depth_cm);
    let points = validation_points(angles, depth_cm, boh_angle, RADIUS_CM).expect("points");
    let plane = fit_plane(&points).expect("plane");
    let depth = resolve_axis_depth(&plane).expect("depth");
    let local = local_angles(&plane.normal, boh.angle_for_depth(depth)).expect("local angles");
    let real = true_orientation(local, boh.angle_for_depth(depth), hole).expect("orientation");
    (depth, local, real)
}

#[test]
fn inclined_hole_fixture_from_picked_points() {
    let hole = DrillHoleOrientation {
        azimuth: 45.0,
        dip: -65.0,
    };
    let boh = BohReference::new(90.0, 90.0).expect("boh");
    let (depth, local, real) = measure(
        LocalAngles {
            alpha: 30.0,
            beta: 15.0,
        },
        7.5,
        &boh,
        &hole,
    );
    assert_abs_diff_eq!(depth, 7.5, epsilon = 1e-9);
    assert_abs_diff_eq!(local.alpha, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(local.beta, 15.0, epsilon = 1e-9);
    assert_abs_diff_eq!(real.dip, 81.49172830486924, epsilon = 1e-6);
    assert_abs_diff_eq!(real.dip_direction, 286.0060869982491, epsilon = 1e-6);
}

#[test]
fn plane_square_to_the_core_follows_the_hole() {
    for azimuth in [10.0, 95.0, 181.0, 300.0] {
        for dip in [-85.0, -60.0, -30.0] {
            let hole = DrillHoleOrientation { azimuth, dip };
            let real = true_orientation(LocalAngles { alpha: 0.0, beta: 0.0 }, 90.0, &hole)
                .expect("orientation");
            assert_abs_diff_eq!(real.dip, -dip, epsilon = 1e-9);
            assert_abs_diff_eq!(real.dip_direction, azimuth, epsilon = 1e-9);
        }
    }
}

#[test]
fn both_boh_lines_round_trip_along_the_core() {
    let boh = BohReference::new(75.0, 105.0).expect("boh");
    let hole = DrillHoleOrientation {
        azimuth: 120.0,
        dip: -50.0,
    };
    for depth in [3.0, 14.9, 15.1, 29.0, 44.0] {
        for (alpha, beta) in [(5.0, 0.5), (45.0, 180.0), (80.0, 359.0)] {
            let (resolved, local, real) = measure(LocalAngles { alpha, beta }, depth, &boh, &hole);
            assert_abs_diff_eq!(resolved, depth, epsilon = 1e-9);
            assert_abs_diff_eq!(local.alpha, alpha, epsilon = 1e-6);
            assert_abs_diff_eq!(local.beta, beta, epsilon = 1e-6);
            assert!((0.0..=90.0).contains(&real.dip));
            assert!((0.0..360.0).contains(&real.dip_direction));
        }
    }
}

#[test]
fn structure_position_along_inclined_hole() {
    let collar = SpatialCoordinates::new(1000.0, 2000.0, 300.0);
    let hole = DrillHoleOrientation {
        azimuth: 90.0,
        dip: -30.0,
    };
    let p = project_along_hole(&collar, &hole, 100.0);
    let horizontal = 100.0 * 30.0_f64.to_radians().cos();
    assert_abs_diff_eq!(p.east, 1000.0 + horizontal, epsilon = 1e-9);
    assert_abs_diff_eq!(p.north, 2000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.elevation, 250.0, epsilon = 1e-9);
}
