use serde::{Deserialize, Serialize};

/// Circle of constant plunge, centered on the net.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCircle {
    pub plunge: f64,
    pub radius: f64,
}

/// Radial line from the center to the primitive circle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub azimuth: f64,
    pub end: [f64; 2],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StereonetGrid {
    /// Outermost (the primitive, plunge 0) first.
    pub circles: Vec<GridCircle>,
    pub lines: Vec<GridLine>,
}
