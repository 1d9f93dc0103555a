use crate::{GeometryError, PickedPoint};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// `|v1 × v2|` below this fraction of `|v1|·|v2|` counts as collinear
/// (sine of the angle between the edges, roughly 2e-7 degrees).
const COLLINEAR_SINE_EPS: f64 = 1e-9;
/// Normal `z` component below which a plane is treated as parallel to the axis.
pub(crate) const AXIS_PARALLEL_EPS: f64 = 1e-9;

/// Plane `a·x + b·y + c·z + d = 0` in the core frame.
///
/// `(a, b, c)` equals the unit `normal`; both are kept so consumers can use
/// whichever form they need.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub normal: Vector3<f64>,
}

impl PlaneEquation {
    fn from_unit_normal(normal: Vector3<f64>, through: &Point3<f64>) -> Self {
        Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(&through.coords),
            normal,
        }
    }

    /// Signed distance of `p` from the plane, positive on the normal side.
    #[inline]
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    /// Height of the plane above `(x, y)`, or `None` for planes parallel to the axis.
    pub fn z_at(&self, x: f64, y: f64) -> Option<f64> {
        if self.c.abs() < AXIS_PARALLEL_EPS {
            return None;
        }
        Some(-(self.a * x + self.b * y + self.d) / self.c)
    }

    /// Same plane with the normal flipped so that `c >= 0`.
    pub fn oriented_along_axis(&self) -> Self {
        if self.c < 0.0 {
            Self {
                a: -self.a,
                b: -self.b,
                c: -self.c,
                d: -self.d,
                normal: -self.normal,
            }
        } else {
            *self
        }
    }
}

/// Fit the plane through three points.
///
/// Edges `v1 = p2 - p1`, `v2 = p3 - p1`; the normal is `v1 × v2`, normalized.
/// Collinear or coincident points yield [`GeometryError::DegeneratePlane`];
/// no substitute plane is ever produced.
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub fn fit_plane(points: &[Point3<f64>; 3]) -> Result<PlaneEquation, GeometryError> {
    if points
        .iter()
        .any(|p| p.coords.iter().any(|v| !v.is_finite()))
    {
        return Err(GeometryError::InvalidNumericInput);
    }

    let [p1, p2, p3] = points;
    let v1 = p2 - p1;
    let v2 = p3 - p1;
    let n = v1.cross(&v2);

    let scale = v1.norm() * v2.norm();
    let norm = n.norm();
    if scale <= 0.0 || norm <= COLLINEAR_SINE_EPS * scale {
        return Err(GeometryError::DegeneratePlane);
    }

    Ok(PlaneEquation::from_unit_normal(n / norm, p1))
}

/// [`fit_plane`] over picked points; anything other than exactly three points
/// has no unique plane.
pub fn fit_picked_points(points: &[PickedPoint]) -> Result<PlaneEquation, GeometryError> {
    let [p1, p2, p3] = points else {
        return Err(GeometryError::DegeneratePlane);
    };
    fit_plane(&[p1.position, p2.position, p3.position])
}

/// Axial depth where the plane crosses the core axis (`x = y = 0`): `z = -d / c`.
///
/// A plane parallel to the axis has no unique crossing and yields
/// [`GeometryError::NoAxisIntersection`], which is distinct from a depth of 0.
pub fn resolve_axis_depth(plane: &PlaneEquation) -> Result<f64, GeometryError> {
    if !plane.c.is_finite() || !plane.d.is_finite() {
        return Err(GeometryError::InvalidNumericInput);
    }
    plane.z_at(0.0, 0.0).ok_or(GeometryError::NoAxisIntersection)
}
