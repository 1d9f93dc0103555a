use serde::{Deserialize, Serialize};

/// Radial mapping of the net.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Schmidt net: `r = R·√2·sin(θ/2)`.
    #[default]
    EqualArea,
    /// Wulff net: `r = R·tan(θ/2)`.
    EqualAngle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereonetParams {
    /// Radius of the primitive circle.
    pub radius: f64,
    pub projection: Projection,
    /// Spacing of grid circles (plunge) and radial lines (azimuth), degrees.
    pub grid_step_deg: f64,
    /// Polyline samples per great circle.
    pub great_circle_samples: usize,
}

impl Default for StereonetParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            projection: Projection::EqualArea,
            grid_step_deg: 10.0,
            great_circle_samples: 100,
        }
    }
}
