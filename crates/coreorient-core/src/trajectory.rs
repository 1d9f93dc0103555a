use crate::DrillHoleOrientation;
use serde::{Deserialize, Serialize};

/// Map-frame position in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialCoordinates {
    pub east: f64,
    pub north: f64,
    pub elevation: f64,
}

/// Hole collar; same frame and units as every other map position.
pub type Collar = SpatialCoordinates;

impl SpatialCoordinates {
    pub fn new(east: f64, north: f64, elevation: f64) -> Self {
        Self {
            east,
            north,
            elevation,
        }
    }

    /// Position `depth_m` meters down a straight hole collared at `self`.
    pub fn along_hole(&self, hole: &DrillHoleOrientation, depth_m: f64) -> SpatialCoordinates {
        project_along_hole(self, hole, depth_m)
    }
}

/// Straight-hole projection from the collar.
///
/// `horizontal = depth·cos(dip)`, `vertical = depth·sin(dip)`; the horizontal
/// part is split along the azimuth. No failure modes for finite input.
pub fn project_along_hole(
    collar: &Collar,
    hole: &DrillHoleOrientation,
    depth_m: f64,
) -> SpatialCoordinates {
    let dip = hole.dip.to_radians();
    let azimuth = hole.azimuth.to_radians();
    let horizontal = depth_m * dip.cos();
    let vertical = depth_m * dip.sin();

    SpatialCoordinates {
        east: collar.east + horizontal * azimuth.sin(),
        north: collar.north + horizontal * azimuth.cos(),
        elevation: collar.elevation + vertical,
    }
}
