use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A point picked on the virtual core, in centimeters in the core frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickedPoint {
    pub id: u32,
    pub position: Point3<f64>,
}

impl PickedPoint {
    pub fn new(id: u32, position: Point3<f64>) -> Self {
        Self { id, position }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|v| v.is_finite())
    }
}

/// Dimensions of the virtual core cylinder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoreGeometry {
    /// Cylinder radius in centimeters.
    pub radius_cm: f64,
    /// Length of the modelled core section along the axis, in centimeters.
    ///
    /// Axial coordinates are valid in `[0, height_cm]`.
    pub height_cm: f64,
}

impl Default for CoreGeometry {
    fn default() -> Self {
        // HQ core, 63.5 mm diameter, 30 cm section.
        Self {
            radius_cm: 3.175,
            height_cm: 30.0,
        }
    }
}

impl CoreGeometry {
    /// Clamp an axial coordinate into `[0, height_cm]`.
    #[inline]
    pub fn clamp_axial(&self, z: f64) -> f64 {
        z.clamp(0.0, self.height_cm.max(0.0))
    }

    /// Point on the cylinder wall at surface azimuth `azimuth_deg` and height `z`.
    pub fn surface_point(&self, azimuth_deg: f64, z: f64) -> Point3<f64> {
        let t = azimuth_deg.to_radians();
        Point3::new(self.radius_cm * t.cos(), self.radius_cm * t.sin(), z)
    }
}
