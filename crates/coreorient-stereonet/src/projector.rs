use crate::{GridCircle, GridLine, Projection, StereonetError, StereonetGrid, StereonetParams};
use coreorient_core::{wrap_degrees, RealOrientation};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A projected orientation in net coordinates (`+y` north, `+x` east).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StereonetPoint {
    pub x: f64,
    pub y: f64,
    pub orientation: RealOrientation,
}

/// Everything needed to draw a net: points, their great circles and the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stereonet {
    pub params: StereonetParams,
    pub points: Vec<StereonetPoint>,
    pub great_circles: Vec<Vec<[f64; 2]>>,
    pub grid: StereonetGrid,
}

#[derive(Clone, Debug)]
pub struct StereonetProjector {
    params: StereonetParams,
}

impl StereonetProjector {
    pub fn new(params: StereonetParams) -> Result<Self, StereonetError> {
        if !params.radius.is_finite() || params.radius <= 0.0 {
            return Err(StereonetError::InvalidRadius {
                radius: params.radius,
            });
        }
        if !(params.grid_step_deg > 0.0 && params.grid_step_deg <= 90.0) {
            return Err(StereonetError::InvalidGridStep {
                step: params.grid_step_deg,
            });
        }
        if params.great_circle_samples < 2 {
            return Err(StereonetError::TooFewSamples {
                samples: params.great_circle_samples,
            });
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &StereonetParams {
        &self.params
    }

    /// Distance from the center for a line of the given plunge (degrees).
    ///
    /// The angular distance from the center is `θ = 90° - plunge`, clamped to
    /// `[0°, 90°]`.
    pub fn radius_for_plunge(&self, plunge_deg: f64) -> f64 {
        let theta = (90.0 - plunge_deg).clamp(0.0, 90.0).to_radians();
        let r = self.params.radius;
        match self.params.projection {
            Projection::EqualArea => r * SQRT_2 * (theta / 2.0).sin(),
            Projection::EqualAngle => r * (theta / 2.0).tan(),
        }
    }

    fn polar(&self, azimuth_deg: f64, plunge_deg: f64) -> [f64; 2] {
        let r = self.radius_for_plunge(plunge_deg);
        let t = azimuth_deg.to_radians();
        [r * t.sin(), r * t.cos()]
    }

    /// Place each orientation in its dip direction with `plunge = 90° - dip`.
    pub fn project(&self, orientations: &[RealOrientation]) -> Vec<StereonetPoint> {
        orientations
            .iter()
            .map(|o| {
                let [x, y] = self.polar(o.dip_direction, 90.0 - o.dip);
                StereonetPoint {
                    x,
                    y,
                    orientation: *o,
                }
            })
            .collect()
    }

    /// Polyline of the plane's great circle.
    ///
    /// Samples lines in the plane from the strike through the dip direction
    /// to the opposite strike, each at its apparent dip
    /// `atan(tan(dip)·sin(ψ))`.
    pub fn great_circle(&self, orientation: &RealOrientation) -> Vec<[f64; 2]> {
        let n = self.params.great_circle_samples;
        let dip = orientation.dip.to_radians();
        let strike = orientation.dip_direction - 90.0;
        (0..n)
            .map(|i| {
                let psi = std::f64::consts::PI * i as f64 / (n - 1) as f64;
                let plunge = (dip.sin() * psi.sin()).atan2(dip.cos()).to_degrees();
                self.polar(wrap_degrees(strike + psi.to_degrees()), plunge)
            })
            .collect()
    }

    /// Static reference grid: plunge circles and radial azimuth lines.
    pub fn grid(&self) -> StereonetGrid {
        let step = self.params.grid_step_deg;
        let circles = (0..)
            .map(|k| k as f64 * step)
            .take_while(|plunge| *plunge < 90.0)
            .map(|plunge| GridCircle {
                plunge,
                radius: self.radius_for_plunge(plunge),
            })
            .collect();
        let lines = (0..)
            .map(|k| k as f64 * step)
            .take_while(|azimuth| *azimuth < 360.0)
            .map(|azimuth| GridLine {
                azimuth,
                end: self.polar(azimuth, 0.0),
            })
            .collect();
        StereonetGrid { circles, lines }
    }

    /// Project orientations together with their great circles and the grid.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(n = orientations.len()))
    )]
    pub fn plot(&self, orientations: &[RealOrientation]) -> Stereonet {
        debug!(
            "plotting {} orientations ({:?})",
            orientations.len(),
            self.params.projection
        );
        Stereonet {
            params: self.params.clone(),
            points: self.project(orientations),
            great_circles: orientations.iter().map(|o| self.great_circle(o)).collect(),
            grid: self.grid(),
        }
    }
}
