//! Forward/inverse check of the local angle math.

use coreorient_core::{
    fit_plane, local_angles, resolve_axis_depth, validation_points, GeometryError, LocalAngles,
};
use serde::{Deserialize, Serialize};

/// Default agreement required between constructed and recovered angles, degrees.
pub const ROUND_TRIP_TOLERANCE_DEG: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub expected: LocalAngles,
    pub recovered: LocalAngles,
    pub depth_cm: f64,
    pub recovered_depth_cm: f64,
    pub boh_angle: f64,
    pub alpha_error: f64,
    /// Shortest angular difference, so `359.9` vs `0.1` is `0.2`.
    pub beta_error: f64,
}

impl RoundTrip {
    pub fn passed(&self, tolerance_deg: f64) -> bool {
        self.alpha_error <= tolerance_deg && self.beta_error <= tolerance_deg
    }
}

/// Shortest distance between two azimuths, degrees.
pub fn azimuth_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Build the validation points for `expected`, refit them and extract the
/// angles again. The points are not clamped to any core length.
pub fn local_angle_round_trip(
    expected: LocalAngles,
    depth_cm: f64,
    boh_angle: f64,
    radius_cm: f64,
) -> Result<RoundTrip, GeometryError> {
    let points = validation_points(expected, depth_cm, boh_angle, radius_cm)?;
    let plane = fit_plane(&points)?;
    let recovered = local_angles(&plane.normal, boh_angle)?;
    Ok(RoundTrip {
        expected,
        recovered,
        depth_cm,
        recovered_depth_cm: resolve_axis_depth(&plane)?,
        boh_angle,
        alpha_error: (recovered.alpha - expected.alpha).abs(),
        beta_error: azimuth_difference(recovered.beta, expected.beta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn azimuth_difference_wraps() {
        assert!((azimuth_difference(359.9, 0.1) - 0.2).abs() < 1e-9);
        assert!((azimuth_difference(10.0, 350.0) - 20.0).abs() < 1e-9);
        assert_eq!(azimuth_difference(90.0, 90.0), 0.0);
    }

    #[test]
    fn round_trip_recovers_angles_and_depth() {
        let rt = local_angle_round_trip(
            LocalAngles {
                alpha: 63.0,
                beta: 301.0,
            },
            22.0,
            78.0,
            3.175,
        )
        .expect("round trip");
        assert!(rt.passed(ROUND_TRIP_TOLERANCE_DEG));
        assert!((rt.recovered_depth_cm - 22.0).abs() < 1e-9);
    }

    #[test]
    fn axis_parallel_plane_cannot_round_trip() {
        let err = local_angle_round_trip(LocalAngles { alpha: 90.0, beta: 0.0 }, 5.0, 90.0, 3.175);
        assert_eq!(err, Err(GeometryError::NoAxisIntersection));
    }
}
