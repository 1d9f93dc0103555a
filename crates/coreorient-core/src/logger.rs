//! Minimal logger.
//!
//! Prints `[elapsed LEVEL target] message` to stderr. Use `init_with_level`
//! once at startup; the CLI maps `-v` flags through `level_from_verbosity`.
//! With the `tracing` feature, `init_tracing` takes the same level.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // `coreorient_trio::manager` -> `trio::manager`
        let target = record
            .target()
            .strip_prefix("coreorient_")
            .unwrap_or(record.target());
        let elapsed = self.started.elapsed().as_secs_f64();
        let _ = writeln!(
            std::io::stderr(),
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            target,
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// `0 -> Warn`, `1 -> Info`, `2 -> Debug`, `3+ -> Trace`.
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Crates whose events follow the verbosity level; everything else stays at `warn`.
const SESSION_TARGETS: [&str; 4] = [
    "coreorient",
    "coreorient_core",
    "coreorient_trio",
    "coreorient_stereonet",
];

/// `RUST_LOG`-style directives used when the environment sets none.
///
/// `Info` yields `warn,coreorient=info,coreorient_core=info,...` so that
/// trio sealing and depth resolution show up without dependency noise.
pub fn default_filter(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = String::from("warn");
    for target in SESSION_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Install a `tracing` subscriber for a picking session.
///
/// `RUST_LOG` wins when set (e.g. `RUST_LOG=coreorient_trio=debug` to follow
/// every point move); otherwise the coreorient crates log at `level`.
/// `json` switches to one flattened JSON object per event, which is what
/// `--json-logs` on the CLI selects. Spans from `instrument`ed session
/// operations are reported when they close.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
