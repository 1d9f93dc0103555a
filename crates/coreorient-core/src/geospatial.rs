//! Local-to-global orientation transform.

use crate::angles::{local_normal, wrap_degrees};
use crate::{GeometryError, LocalAngles};
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Orientation of the drillhole at the measured interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrillHoleOrientation {
    /// Bearing of the hole, degrees clockwise from north in `[0, 360)`.
    pub azimuth: f64,
    /// Inclination from horizontal in `[-90, 90]`; negative points downward.
    pub dip: f64,
}

impl Default for DrillHoleOrientation {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            dip: -90.0,
        }
    }
}

impl DrillHoleOrientation {
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.azimuth.is_finite() && self.dip.is_finite()
    }

    /// Rotation taking core-frame vectors into the map frame.
    ///
    /// The core is first laid along a horizontal hole pointing north (core
    /// `z` to north, core `y` towards the bottom of the hole, core `x` east),
    /// then tilted by `dip` about the horizontal axis perpendicular to the
    /// hole, then turned by `azimuth` clockwise about the vertical.
    pub fn rotation(&self) -> Rotation3<f64> {
        let turn = Rotation3::from_axis_angle(&Vector3::z_axis(), -self.azimuth.to_radians());
        let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), self.dip.to_radians());
        let lay_down = Rotation3::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
        turn * tilt * lay_down
    }

    /// Unit vector pointing down the hole in the map frame.
    pub fn direction(&self) -> Vector3<f64> {
        let az = self.azimuth.to_radians();
        let dip = self.dip.to_radians();
        Vector3::new(dip.cos() * az.sin(), dip.cos() * az.cos(), dip.sin())
    }
}

/// True orientation of a plane in the map frame, degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealOrientation {
    /// In `[0, 90]`.
    pub dip: f64,
    /// In `[0, 360)`.
    pub dip_direction: f64,
}

/// Reduce a map-frame vector to `(dip, dip direction)`.
///
/// `dip = asin(|N_z|)`; `dip direction = atan2(N_x, N_y)`, turned by 180°
/// when `N_z > 0` so it always points to the downward side.
pub fn orientation_from_global_normal(n: &Vector3<f64>) -> RealOrientation {
    let norm = n.norm();
    let nz = if norm > 0.0 { n.z / norm } else { 0.0 };

    let dip = nz.abs().clamp(0.0, 1.0).asin().to_degrees();
    let mut dip_direction = n.x.atan2(n.y).to_degrees();
    if nz > 0.0 {
        dip_direction += 180.0;
    }

    RealOrientation {
        dip,
        dip_direction: wrap_degrees(dip_direction),
    }
}

/// Rotate a structure's local normal into the map frame and reduce it to a
/// true dip / dip direction.
///
/// Fails only on non-finite input.
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip(hole)))]
pub fn true_orientation(
    angles: LocalAngles,
    boh_deg: f64,
    hole: &DrillHoleOrientation,
) -> Result<RealOrientation, GeometryError> {
    if !angles.alpha.is_finite()
        || !angles.beta.is_finite()
        || !boh_deg.is_finite()
        || !hole.is_finite()
    {
        return Err(GeometryError::InvalidNumericInput);
    }

    let local = local_normal(angles, boh_deg);
    let global = hole.rotation() * local;
    Ok(orientation_from_global_normal(&global))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn inclined_hole_regression_fixture() {
        let hole = DrillHoleOrientation {
            azimuth: 45.0,
            dip: -65.0,
        };
        let angles = LocalAngles {
            alpha: 30.0,
            beta: 15.0,
        };
        let got = true_orientation(angles, 90.0, &hole).unwrap();
        assert_abs_diff_eq!(got.dip, 81.49172830486924, epsilon = 1e-9);
        assert_abs_diff_eq!(got.dip_direction, 286.0060869982491, epsilon = 1e-9);

        let again = true_orientation(angles, 90.0, &hole).unwrap();
        assert_eq!(got, again);
    }

    #[test]
    fn rotation_maps_core_axis_down_the_hole() {
        for (azimuth, dip) in [(0.0, -90.0), (45.0, -65.0), (210.0, -30.0), (300.0, 10.0)] {
            let hole = DrillHoleOrientation { azimuth, dip };
            let r = hole.rotation();
            assert_abs_diff_eq!(r * Vector3::z(), hole.direction(), epsilon = 1e-12);
            // bottom-of-hole side never points up for a downward hole
            if dip < 0.0 {
                assert!((r * Vector3::y()).z <= 1e-12);
            }
        }
    }

    #[test]
    fn output_ranges_hold_for_any_finite_input() {
        for azimuth in [0.0, 33.0, 180.0, 359.9] {
            for dip in [-90.0, -60.0, -5.0, 0.0, 45.0, 90.0] {
                for alpha in [0.0, 10.0, 45.0, 89.0, 90.0, 135.0] {
                    for beta in [-30.0, 0.0, 90.0, 271.0, 720.0] {
                        for boh in [70.0, 90.0, 110.0] {
                            let hole = DrillHoleOrientation { azimuth, dip };
                            let o = true_orientation(LocalAngles { alpha, beta }, boh, &hole)
                                .unwrap();
                            assert!((0.0..=90.0).contains(&o.dip), "{o:?}");
                            assert!((0.0..360.0).contains(&o.dip_direction), "{o:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let hole = DrillHoleOrientation {
            azimuth: f64::NAN,
            dip: -60.0,
        };
        let angles = LocalAngles {
            alpha: 20.0,
            beta: 0.0,
        };
        assert_eq!(
            true_orientation(angles, 90.0, &hole),
            Err(GeometryError::InvalidNumericInput)
        );
        assert_eq!(
            true_orientation(angles, f64::INFINITY, &DrillHoleOrientation::default()),
            Err(GeometryError::InvalidNumericInput)
        );
    }

    #[test]
    fn upward_vector_is_turned_to_downward_side() {
        let up = orientation_from_global_normal(&Vector3::new(0.0, 1.0, 1.0));
        let down = orientation_from_global_normal(&Vector3::new(0.0, -1.0, -1.0));
        assert_abs_diff_eq!(up.dip, 45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(up.dip_direction, 180.0, epsilon = 1e-12);
        assert_eq!(up, down);
    }
}
