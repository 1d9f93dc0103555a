//! JSON session configuration and report helpers.

use crate::{DrillHole, RoundTrip, SkippedTrio, StructureReport};
use coreorient_core::BohReference;
use coreorient_stereonet::{Stereonet, StereonetParams};
use coreorient_trio::TrioManagerParams;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum SessionIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Three picked points, in core coordinates (cm), plus an optional manual depth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrioInput {
    pub points: Vec<Point3<f64>>,
    #[serde(default)]
    pub depth_cm: Option<f64>,
}

/// Known local angles to construct a validation trio from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationInput {
    pub alpha: f64,
    pub beta: f64,
    pub depth_cm: f64,
}

fn default_hole_length_m() -> f64 {
    1000.0
}

/// A recorded picking session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub hole: DrillHole,
    #[serde(default)]
    pub boh: BohReference,
    #[serde(default)]
    pub trio: TrioManagerParams,
    #[serde(default)]
    pub stereonet: StereonetParams,
    /// Upper bound for manual depths.
    #[serde(default = "default_hole_length_m")]
    pub hole_length_m: f64,
    #[serde(default)]
    pub trios: Vec<TrioInput>,
    #[serde(default)]
    pub validation: Vec<ValidationInput>,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hole: DrillHole::default(),
            boh: BohReference::default(),
            trio: TrioManagerParams::default(),
            stereonet: StereonetParams::default(),
            hole_length_m: default_hole_length_m(),
            trios: Vec::new(),
            validation: Vec::new(),
            output_path: None,
        }
    }
}

impl SessionConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("coreorient_report.json"))
    }

    pub fn max_depth_cm(&self) -> f64 {
        self.hole_length_m * 100.0
    }
}

/// Validation trio check as recorded in the report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub trio_id: u32,
    pub check: RoundTrip,
    pub passed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub config_path: String,
    pub hole: DrillHole,
    pub boh: BohReference,
    pub structures: Vec<StructureReport>,
    #[serde(default)]
    pub skipped: Vec<SkippedTrio>,
    #[serde(default)]
    pub validation: Vec<ValidationReport>,
    pub stereonet: Stereonet,
}

impl SessionReport {
    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: SessionConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(cfg, SessionConfig::default());
        assert_eq!(cfg.max_depth_cm(), 100_000.0);
        assert_eq!(cfg.output_path(), PathBuf::from("coreorient_report.json"));
    }

    #[test]
    fn config_survives_a_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let cfg = SessionConfig {
            trios: vec![TrioInput {
                points: vec![Point3::new(1.0, 2.0, 3.0)],
                depth_cm: Some(12.0),
            }],
            ..SessionConfig::default()
        };
        cfg.write_json(&path).expect("write");
        assert_eq!(SessionConfig::load_json(&path).expect("load"), cfg);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SessionConfig::load_json("/definitely/not/here.json").expect_err("missing");
        assert!(matches!(err, SessionIoError::Io(_)));
    }
}
