//! coreorient CLI: replay picking sessions and check the orientation math.

use clap::{Args, Parser, Subcommand};
use coreorient::{
    local_angle_round_trip, run_session_file, DrillHoleOrientation, LocalAngles,
    ROUND_TRIP_TOLERANCE_DEG,
};
use coreorient::core::{true_orientation, CoreGeometry};
use log::info;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "coreorient")]
#[command(about = "Structural orientation from oriented drill core")]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON logs (only with the `tracing` feature).
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session file and write its structure report (JSON).
    Report {
        /// Session config (JSON).
        config: PathBuf,

        /// Report path; defaults to the config's `output_path`.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Build a validation plane from known angles and recover them.
    SelfTest(SelfTestArgs),
}

#[derive(Debug, Clone, Args)]
struct SelfTestArgs {
    /// Local dip from the core axis, degrees.
    #[arg(long)]
    alpha: f64,

    /// Local azimuth from the BOH line, degrees.
    #[arg(long)]
    beta: f64,

    /// Axis depth within the core section, cm.
    #[arg(long, default_value = "15.0")]
    depth: f64,

    /// BOH line angle, degrees.
    #[arg(long, default_value = "90.0")]
    boh: f64,

    /// Core radius, cm.
    #[arg(long)]
    radius: Option<f64>,

    /// Hole azimuth, degrees.
    #[arg(long, default_value = "0.0")]
    azimuth: f64,

    /// Hole dip, degrees (negative points down).
    #[arg(long, default_value = "-90.0", allow_hyphen_values = true)]
    dip: f64,
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: u8, json: bool) {
    coreorient::core::init_tracing(coreorient::core::level_from_verbosity(verbose), json);
    let _ = tracing_log::LogTracer::init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8, _json: bool) {
    let _ = coreorient::core::init_with_level(coreorient::core::level_from_verbosity(verbose));
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Report { config, out } => run_report(&config, out),
        Commands::SelfTest(args) => run_self_test(&args),
    }
}

fn run_report(config: &Path, out: Option<PathBuf>) -> CliResult<()> {
    info!("replaying {}", config.display());
    let report = run_session_file(config, out.as_deref())?;

    println!("structures: {}", report.structures.len());
    for s in &report.structures {
        println!(
            "  trio {:>3}  depth {:>9.3} m  dip {:>6.2}  dip dir {:>6.2}",
            s.trio_id, s.depth_m, s.orientation.dip, s.orientation.dip_direction
        );
    }
    if !report.skipped.is_empty() {
        println!("skipped: {}", report.skipped.len());
    }
    let failed = report.validation.iter().filter(|v| !v.passed).count();
    if failed > 0 {
        return Err(format!("{failed} validation trio(s) failed the round trip").into());
    }
    Ok(())
}

fn run_self_test(args: &SelfTestArgs) -> CliResult<()> {
    let expected = LocalAngles {
        alpha: args.alpha,
        beta: args.beta,
    };
    let radius = args.radius.unwrap_or(CoreGeometry::default().radius_cm);
    let rt = local_angle_round_trip(expected, args.depth, args.boh, radius)?;

    println!(
        "expected  alpha {:.6}  beta {:.6}",
        rt.expected.alpha, rt.expected.beta
    );
    println!(
        "recovered alpha {:.6}  beta {:.6}  depth {:.6} cm",
        rt.recovered.alpha, rt.recovered.beta, rt.recovered_depth_cm
    );
    println!(
        "error     alpha {:.2e}  beta {:.2e}",
        rt.alpha_error, rt.beta_error
    );

    let hole = DrillHoleOrientation {
        azimuth: args.azimuth,
        dip: args.dip,
    };
    let real = true_orientation(rt.recovered, args.boh, &hole)?;
    println!(
        "true      dip {:.4}  dip direction {:.4}",
        real.dip, real.dip_direction
    );

    if !rt.passed(ROUND_TRIP_TOLERANCE_DEG) {
        return Err("round trip exceeded tolerance".into());
    }
    println!("round trip ok");
    Ok(())
}
