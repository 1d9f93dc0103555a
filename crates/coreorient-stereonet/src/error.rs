#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StereonetError {
    #[error("stereonet radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f64 },
    #[error("grid step must be in (0, 90] degrees, got {step}")]
    InvalidGridStep { step: f64 },
    #[error("great circles need at least 2 samples, got {samples}")]
    TooFewSamples { samples: usize },
}
