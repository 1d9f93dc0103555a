use crate::{CoreGeometry, PlaneEquation};
use nalgebra::Point3;
use std::f64::consts::TAU;

/// Sample where a plane meets the cylinder wall, for overlay rendering.
///
/// Returns `samples` points at evenly spaced surface azimuths starting at
/// `0°`, each clamped into the modelled section. Planes parallel to the axis
/// have no single height per azimuth and yield an empty outline.
pub fn plane_cylinder_outline(
    plane: &PlaneEquation,
    geometry: &CoreGeometry,
    samples: usize,
) -> Vec<Point3<f64>> {
    let mut out = Vec::with_capacity(samples);
    for i in 0..samples {
        let t = TAU * i as f64 / samples as f64;
        let x = geometry.radius_cm * t.cos();
        let y = geometry.radius_cm * t.sin();
        let Some(z) = plane.z_at(x, y) else {
            return Vec::new();
        };
        out.push(Point3::new(x, y, geometry.clamp_axial(z)));
    }
    out
}
