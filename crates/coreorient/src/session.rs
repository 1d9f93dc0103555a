//! Replaying a recorded session into a report.

use crate::{
    azimuth_difference, build_structure_reports, structure_stereonet, RoundTrip, SessionConfig,
    SessionIoError, SessionReport, ValidationReport, ROUND_TRIP_TOLERANCE_DEG,
};
use coreorient_core::{resolve_axis_depth, GeometryError, LocalAngles};
use coreorient_stereonet::{StereonetError, StereonetProjector};
use coreorient_trio::{TrioError, TrioManager, TRIO_SIZE};
use log::info;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("trio {index} has {count} points, expected 3")]
    TrioSize { index: usize, count: usize },
    #[error("trio {index}: {source}")]
    Trio {
        index: usize,
        #[source]
        source: TrioError,
    },
    #[error("validation trio {index}: {source}")]
    Validation {
        index: usize,
        #[source]
        source: TrioError,
    },
    #[error("invalid BOH reference: {0}")]
    Boh(#[from] GeometryError),
    #[error(transparent)]
    Stereonet(#[from] StereonetError),
    #[error(transparent)]
    Io(#[from] SessionIoError),
}

/// Feed the recorded picks and validation trios through a fresh manager.
///
/// The scene is treated as captured. Trios are picked in order; a trio with
/// `depth_cm` gets it set right after its third point, so the first trio
/// must carry one for the rest to be accepted.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn replay_session(config: &SessionConfig) -> Result<TrioManager, SessionError> {
    config.boh.validate()?;
    let mut manager = TrioManager::new(config.trio.clone());
    manager.set_scene_captured(true);

    for (index, input) in config.trios.iter().enumerate() {
        if input.points.len() != TRIO_SIZE {
            return Err(SessionError::TrioSize {
                index,
                count: input.points.len(),
            });
        }
        let wrap = |source| SessionError::Trio { index, source };
        let mut trio_id = None;
        for p in &input.points {
            trio_id = Some(manager.add_point(*p).map_err(wrap)?.trio_id);
        }
        if let (Some(trio_id), Some(depth)) = (trio_id, input.depth_cm) {
            manager
                .set_trio_depth(trio_id, depth, config.max_depth_cm())
                .map_err(wrap)?;
        }
    }

    for (index, v) in config.validation.iter().enumerate() {
        let boh_angle = config.boh.angle_for_depth(v.depth_cm);
        manager
            .create_validation_trio(v.alpha, v.beta, v.depth_cm, boh_angle)
            .map_err(|source| SessionError::Validation { index, source })?;
    }

    info!(
        "replayed {} trios and {} validation trios",
        manager.normal_trio_count(),
        manager.validation_trio_count()
    );
    Ok(manager)
}

/// Compare each validation trio's recovered angles with the ones it was
/// built from.
pub fn check_validation_trios(
    manager: &TrioManager,
    config: &SessionConfig,
) -> Vec<ValidationReport> {
    manager
        .validation_trios()
        .zip(&config.validation)
        .filter_map(|(trio, input)| {
            let recovered = manager.local_angles(trio.id, &config.boh).ok()?;
            let plane = trio.plane?;
            let expected = LocalAngles {
                alpha: input.alpha,
                beta: input.beta,
            };
            let check = RoundTrip {
                expected,
                recovered,
                depth_cm: input.depth_cm,
                recovered_depth_cm: resolve_axis_depth(&plane).unwrap_or(f64::NAN),
                boh_angle: config.boh.angle_for_depth(input.depth_cm),
                alpha_error: (recovered.alpha - expected.alpha).abs(),
                beta_error: azimuth_difference(recovered.beta, expected.beta),
            };
            Some(ValidationReport {
                trio_id: trio.id,
                passed: check.passed(ROUND_TRIP_TOLERANCE_DEG),
                check,
            })
        })
        .collect()
}

/// Replay a session and build its report.
pub fn run_session(
    config: &SessionConfig,
    config_path: &Path,
) -> Result<SessionReport, SessionError> {
    let manager = replay_session(config)?;
    let projector = StereonetProjector::new(config.stereonet.clone())?;
    let (structures, skipped) = build_structure_reports(&manager, &config.boh, &config.hole);
    let stereonet = structure_stereonet(&projector, &structures);
    let validation = check_validation_trios(&manager, config);

    info!(
        "{} structures reported, {} skipped, {}/{} validation checks passed",
        structures.len(),
        skipped.len(),
        validation.iter().filter(|v| v.passed).count(),
        validation.len()
    );
    Ok(SessionReport {
        config_path: config_path.to_string_lossy().into_owned(),
        hole: config.hole,
        boh: config.boh,
        structures,
        skipped,
        validation,
        stereonet,
    })
}

/// Load a session file, replay it and write the report.
pub fn run_session_file(
    config_path: &Path,
    output_path: Option<&Path>,
) -> Result<SessionReport, SessionError> {
    let config = SessionConfig::load_json(config_path)?;
    let report = run_session(&config, config_path)?;
    let out = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_path());
    report.write_json(&out)?;
    info!("report written to {}", out.display());
    Ok(report)
}
