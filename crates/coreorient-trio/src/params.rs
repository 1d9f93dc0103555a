use coreorient_core::CoreGeometry;
use serde::{Deserialize, Serialize};

/// Colors cycled through by trio creation order.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe",
];

/// Configuration of a [`crate::TrioManager`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrioManagerParams {
    /// Virtual core cylinder the points are picked on.
    pub geometry: CoreGeometry,
    /// Maximum number of non-validation trios.
    pub max_trios: usize,
    /// Separate cap for validation trios; `None` leaves them uncapped.
    pub max_validation_trios: Option<usize>,
    /// Trio colors, cycled by creation order. Falls back to
    /// [`DEFAULT_PALETTE`] when empty.
    pub palette: Vec<String>,
    /// Number of samples in each plane's cylinder outline.
    pub outline_samples: usize,
}

impl Default for TrioManagerParams {
    fn default() -> Self {
        Self {
            geometry: CoreGeometry::default(),
            max_trios: 100,
            max_validation_trios: None,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            outline_samples: 72,
        }
    }
}

impl TrioManagerParams {
    /// Palette entry for the `index`-th created trio.
    pub fn color_for(&self, index: usize) -> String {
        if self.palette.is_empty() {
            DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string()
        } else {
            self.palette[index % self.palette.len()].clone()
        }
    }
}
