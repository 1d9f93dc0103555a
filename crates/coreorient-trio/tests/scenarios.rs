use approx::assert_abs_diff_eq;
use coreorient_core::{BohReference, GeometryError};
use coreorient_trio::{TrioError, TrioManager, TrioManagerParams, TrioState};
use nalgebra::Point3;

fn tilted_points(depth: f64) -> [Point3<f64>; 3] {
    // plane z = depth + 0.4 x crossing the axis at `depth`
    [
        Point3::new(3.0, 0.0, depth + 1.2),
        Point3::new(-1.5, 2.6, depth - 0.6),
        Point3::new(-1.5, -2.6, depth - 0.6),
    ]
}

fn session() -> TrioManager {
    let mut manager = TrioManager::default();
    manager.set_scene_captured(true);
    manager
}

fn pick(manager: &mut TrioManager, points: [Point3<f64>; 3]) -> u32 {
    let mut trio_id = None;
    for p in points {
        trio_id = Some(manager.add_point(p).expect("pick").trio_id);
    }
    trio_id.expect("trio id")
}

#[test]
fn first_trio_without_depth_blocks_picking() {
    let mut manager = session();
    let first = pick(&mut manager, tilted_points(5.0));
    let before = manager.trios().to_vec();

    assert_eq!(
        manager.add_point(Point3::new(3.0, 0.0, 20.0)),
        Err(TrioError::FirstTrioDepthMissing)
    );
    assert_eq!(manager.trios(), before.as_slice());
    assert!(manager.current_trio().is_none());

    manager.set_trio_depth(first, 5.0, 5000.0).expect("depth");
    manager
        .add_point(Point3::new(3.0, 0.0, 20.0))
        .expect("gate lifted");
    assert_eq!(
        manager.current_trio().map(|t| t.state()),
        Some(TrioState::Building { points: 1 })
    );
}

#[test]
fn out_of_range_depth_keeps_previous_value() {
    let mut manager = session();
    let first = pick(&mut manager, tilted_points(5.0));
    manager.set_trio_depth(first, 5.0, 1000.0).expect("depth");

    let err = manager
        .set_trio_depth(first, 1001.0, 1000.0)
        .expect_err("out of range");
    assert_eq!(
        err,
        TrioError::DepthOutOfRange {
            depth_cm: 1001.0,
            max_cm: 1000.0,
            max_m: 10.0,
        }
    );
    assert!(err.to_string().contains("10.000 m"));
    assert_eq!(manager.trio(first).and_then(|t| t.depth), Some(5.0));

    assert!(manager.set_trio_depth(first, -0.5, 1000.0).is_err());
    assert_eq!(manager.trio(first).and_then(|t| t.depth), Some(5.0));
}

#[test]
fn trio_cap_applies_to_normal_trios_only() {
    let mut manager = TrioManager::new(TrioManagerParams {
        max_trios: 2,
        ..TrioManagerParams::default()
    });
    manager.set_scene_captured(true);

    let first = pick(&mut manager, tilted_points(5.0));
    manager.set_trio_depth(first, 5.0, 1000.0).expect("depth");
    pick(&mut manager, tilted_points(12.0));

    assert_eq!(
        manager.add_point(Point3::new(3.0, 0.0, 1.0)),
        Err(TrioError::TrioLimitReached { max: 2 })
    );
    manager
        .create_validation_trio(40.0, 200.0, 15.0, 95.0)
        .expect("validation trios are not capped");
    assert_eq!(manager.normal_trio_count(), 2);
    assert_eq!(manager.validation_trio_count(), 1);
}

#[test]
fn validation_trio_round_trips_local_angles() {
    let mut manager = TrioManager::default();
    let boh = BohReference::new(95.0, 85.0).expect("boh");

    for (alpha, beta, depth) in [(12.0, 33.0, 4.0), (55.0, 271.5, 20.0), (71.0, 180.0, 14.0)] {
        let boh_angle = boh.angle_for_depth(depth);
        let id = manager
            .create_validation_trio(alpha, beta, depth, boh_angle)
            .expect("validation trio");
        let recovered = manager.local_angles(id, &boh).expect("angles");
        assert_abs_diff_eq!(recovered.alpha, alpha, epsilon = 1e-3);
        assert_abs_diff_eq!(recovered.beta, beta, epsilon = 1e-3);

        let trio = manager.trio(id).expect("trio");
        assert!(trio.points.iter().all(|p| (0.0..=30.0).contains(&p.position.z)));
    }
}

#[test]
fn steep_validation_trio_is_clamped_into_the_section() {
    let mut manager = TrioManager::default();
    let id = manager
        .create_validation_trio(85.0, 0.0, 1.0, 90.0)
        .expect("validation trio");
    let trio = manager.trio(id).expect("trio");
    assert_eq!(trio.depth, Some(1.0));
    assert!(trio
        .points
        .iter()
        .all(|p| p.position.z >= 0.0 && p.position.z <= 30.0));
}

#[test]
fn validation_trio_parallel_to_axis_is_rejected() {
    let mut manager = TrioManager::default();
    assert_eq!(
        manager.create_validation_trio(90.0, 0.0, 10.0, 90.0),
        Err(TrioError::Geometry(GeometryError::NoAxisIntersection))
    );
    assert!(manager.trios().is_empty());
}

#[test]
fn removing_the_first_trio_promotes_the_next() {
    let mut manager = session();
    let first = pick(&mut manager, tilted_points(5.0));
    manager.set_trio_depth(first, 5.0, 1000.0).expect("depth");
    let second = pick(&mut manager, tilted_points(12.0));

    manager.remove_trio(first).expect("remove");
    assert!(manager.first_trio_depth_supplied());
    assert_eq!(manager.normal_trios().next().map(|t| t.id), Some(second));
    assert_eq!(
        manager.remove_trio(first),
        Err(TrioError::UnknownTrio { id: first })
    );

    manager.clear_all_trios();
    let restarted = pick(&mut manager, tilted_points(3.0));
    assert_eq!(manager.trio(restarted).and_then(|t| t.depth), None);
    assert!(!manager.first_trio_depth_supplied());
}

#[test]
fn promoted_trio_keeps_following_its_plane() {
    let mut manager = session();
    let first = pick(&mut manager, tilted_points(5.0));
    manager.set_trio_depth(first, 5.0, 1000.0).expect("depth");
    let second = pick(&mut manager, tilted_points(12.0));
    let resolved = manager.trio(second).and_then(|t| t.depth).expect("depth");
    assert_abs_diff_eq!(resolved, 12.0, epsilon = 1e-9);

    manager.remove_trio(first).expect("remove");
    let ids: Vec<u32> = manager
        .trio(second)
        .expect("trio")
        .points
        .iter()
        .map(|p| p.id)
        .collect();
    for (pid, p) in ids.iter().zip(tilted_points(20.0)) {
        manager
            .update_point_position(second, *pid, p)
            .expect("move");
    }
    let moved = manager.trio(second).and_then(|t| t.depth).expect("depth");
    assert_abs_diff_eq!(moved, 20.0, epsilon = 1e-9);

    // a hand-entered depth sticks once set
    manager.set_trio_depth(second, 21.0, 1000.0).expect("depth");
    manager
        .update_point_position(second, ids[0], Point3::new(3.0, 0.0, 22.0))
        .expect("move");
    assert_eq!(manager.trio(second).and_then(|t| t.depth), Some(21.0));
}

#[test]
fn plane_snapshots_follow_the_trios() {
    let mut manager = session();
    let first = pick(&mut manager, tilted_points(5.0));
    manager.set_trio_depth(first, 5.0, 1000.0).expect("depth");
    pick(&mut manager, tilted_points(12.0));

    let planes = manager.planes();
    assert_eq!(planes.len(), 2);
    assert_ne!(planes[0].color, planes[1].color);
    for plane in &planes {
        assert!(plane.visible);
        for p in &plane.outline {
            assert_abs_diff_eq!(plane.equation.signed_distance(p), 0.0, epsilon = 1e-9);
        }
    }
}
