//! Local (core-frame) structural angles.
//!
//! A structure's orientation on the core is described by two angles:
//! - `alpha`: inclination of the plane normal from the core axis,
//!   `0°` for a plane cutting the core square, approaching `90°` as the plane
//!   becomes parallel to the axis;
//! - `beta`: azimuth of the normal's horizontal projection measured from the
//!   applicable BOH reference line, in `[0°, 360°)`.
//!
//! [`validation_points`] and [`local_angles`] are exact inverses: building the
//! three surface points for `(alpha, beta)` and fitting a plane through them
//! recovers the same angles.

use crate::plane::AXIS_PARALLEL_EPS;
use crate::GeometryError;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub const BOH_ANGLE_MIN: f64 = 70.0;
pub const BOH_ANGLE_MAX: f64 = 110.0;

/// Surface azimuths of the three points built by [`validation_points`].
pub const VALIDATION_AZIMUTHS_DEG: [f64; 3] = [0.0, 120.0, 240.0];

/// Horizontal component of a unit normal below which beta is undefined.
const AXIAL_NORMAL_EPS: f64 = 1e-12;

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

/// Local angles of a plane, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalAngles {
    pub alpha: f64,
    pub beta: f64,
}

/// Bottom-of-hole reference lines marked on the core surface.
///
/// The measurement interval is split in two halves: depths in the first half
/// are measured against `line1_angle`, the second half against
/// `line2_angle`. The interval repeats along the hole.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BohReference {
    /// Surface azimuth of the first BOH line, degrees in `[70, 110]`.
    pub line1_angle: f64,
    /// Surface azimuth of the second BOH line, degrees in `[70, 110]`.
    pub line2_angle: f64,
    /// Length of the measurement interval in centimeters.
    #[serde(default = "default_interval_cm")]
    pub interval_cm: f64,
}

fn default_interval_cm() -> f64 {
    30.0
}

impl Default for BohReference {
    fn default() -> Self {
        Self {
            line1_angle: 90.0,
            line2_angle: 90.0,
            interval_cm: default_interval_cm(),
        }
    }
}

impl BohReference {
    /// Build a reference with the default interval, validating both angles.
    pub fn new(line1_angle: f64, line2_angle: f64) -> Result<Self, GeometryError> {
        let boh = Self {
            line1_angle,
            line2_angle,
            interval_cm: default_interval_cm(),
        };
        boh.validate()?;
        Ok(boh)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        for angle in [self.line1_angle, self.line2_angle] {
            if !angle.is_finite() {
                return Err(GeometryError::InvalidNumericInput);
            }
            if !(BOH_ANGLE_MIN..=BOH_ANGLE_MAX).contains(&angle) {
                return Err(GeometryError::BohAngleOutOfRange { angle });
            }
        }
        if !self.interval_cm.is_finite() || self.interval_cm <= 0.0 {
            return Err(GeometryError::InvalidNumericInput);
        }
        Ok(())
    }

    /// BOH angle that applies to a measurement at `depth_cm`.
    pub fn angle_for_depth(&self, depth_cm: f64) -> f64 {
        if self.interval_cm.is_nan() || self.interval_cm <= 0.0 || !depth_cm.is_finite() {
            return self.line1_angle;
        }
        let phase = depth_cm.rem_euclid(self.interval_cm);
        if phase < 0.5 * self.interval_cm {
            self.line1_angle
        } else {
            self.line2_angle
        }
    }
}

/// Unit normal of the plane with local angles `angles` against `boh_deg`:
/// `(sin α cos(boh+β), sin α sin(boh+β), cos α)`.
pub fn local_normal(angles: LocalAngles, boh_deg: f64) -> Vector3<f64> {
    let alpha = angles.alpha.to_radians();
    let azimuth = (boh_deg + angles.beta).to_radians();
    Vector3::new(
        alpha.sin() * azimuth.cos(),
        alpha.sin() * azimuth.sin(),
        alpha.cos(),
    )
}

/// Extract `(alpha, beta)` from a plane normal of either sign.
///
/// The normal is oriented to `n_z >= 0` first, so `alpha = arccos(|n_z|)`
/// (computed as `atan2(|n_xy|, n_z)` for accuracy near 0°). For a normal
/// along the axis beta is undefined and reported as `0`.
pub fn local_angles(normal: &Vector3<f64>, boh_deg: f64) -> Result<LocalAngles, GeometryError> {
    if normal.iter().any(|v| !v.is_finite()) || !boh_deg.is_finite() {
        return Err(GeometryError::InvalidNumericInput);
    }
    let norm = normal.norm();
    if norm == 0.0 {
        return Err(GeometryError::DegeneratePlane);
    }

    let n = if normal.z < 0.0 {
        -normal / norm
    } else {
        normal / norm
    };

    let horizontal = n.x.hypot(n.y);
    let alpha = horizontal.atan2(n.z).to_degrees();
    let beta = if horizontal < AXIAL_NORMAL_EPS {
        0.0
    } else {
        wrap_degrees(n.y.atan2(n.x).to_degrees() - boh_deg)
    };

    Ok(LocalAngles { alpha, beta })
}

/// Forward construction of a validation trio.
///
/// Returns three points on the cylinder wall (radius `radius_cm`) at surface
/// azimuths [`VALIDATION_AZIMUTHS_DEG`] that lie exactly on the plane with
/// local angles `angles` crossing the axis at `depth_cm`. Each height solves
/// `z = (d - n_x·x - n_y·y) / n_z` with `d = n · (0, 0, depth)`.
///
/// No clamping is applied here; callers that need points inside the modelled
/// section clamp them afterwards.
pub fn validation_points(
    angles: LocalAngles,
    depth_cm: f64,
    boh_deg: f64,
    radius_cm: f64,
) -> Result<[Point3<f64>; 3], GeometryError> {
    if [angles.alpha, angles.beta, depth_cm, boh_deg, radius_cm]
        .iter()
        .any(|v| !v.is_finite())
        || radius_cm <= 0.0
    {
        return Err(GeometryError::InvalidNumericInput);
    }

    let n = local_normal(angles, boh_deg);
    if n.z.abs() < AXIS_PARALLEL_EPS {
        return Err(GeometryError::NoAxisIntersection);
    }
    let d = n.z * depth_cm;

    Ok(VALIDATION_AZIMUTHS_DEG.map(|az| {
        let t = az.to_radians();
        let x = radius_cm * t.cos();
        let y = radius_cm * t.sin();
        Point3::new(x, y, (d - n.x * x - n.y * y) / n.z)
    }))
}
