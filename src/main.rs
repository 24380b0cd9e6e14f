use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use conduct_io::decode::Snapshot;
use conduct_solver::config::{PlateConfig, DEFAULT_DURATION, SNAPSHOT_FRACTION};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod run;

/// Transient heat conduction in a notched plate cooled by a fluid.
#[derive(Parser)]
#[command(version, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation and write the snapshot.
    Run(RunArgs),
    /// Print statistics of a snapshot file.
    Summary {
        /// Snapshot to read.
        file: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Snapshot output file.
    #[arg(short, long, default_value = "temp.dat")]
    output: PathBuf,

    /// Simulated duration, in seconds.
    #[arg(short, long, default_value_t = DEFAULT_DURATION)]
    duration: f64,

    /// Simulated time of the snapshot, in seconds. Defaults to 2% of the duration.
    #[arg(short, long)]
    snapshot_time: Option<f64>,

    /// Fourier number. The time step is derived from it.
    #[arg(short, long)]
    fourier: Option<f64>,

    /// Grid spacing, in meters.
    #[arg(long)]
    spacing: Option<f64>,

    /// Hide the progress bar.
    #[arg(long)]
    no_progress: bool,
}

impl RunArgs {
    fn config(&self) -> PlateConfig {
        let mut config = PlateConfig::with_duration(self.duration);
        config.snapshot_time = self.snapshot_time.unwrap_or(SNAPSHOT_FRACTION * self.duration);

        if let Some(fourier) = self.fourier {
            config.thermal.fourier = fourier;
        }
        if let Some(spacing) = self.spacing {
            config.grid.spacing = spacing;
        }

        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Run(args) => run::run(&args.config(), &args.output, !args.no_progress),
        Command::Summary { file } => {
            let snapshot = Snapshot::open(&file)
                .with_context(|| format!("failed to read snapshot {}", file.display()))?;
            let (nx, ny) = snapshot.dim();
            let summary = snapshot.summary();

            info!(
                nx,
                ny,
                min = summary.min,
                max = summary.max,
                mean = summary.mean,
                missing = summary.missing,
                "{}",
                file.display()
            );

            Ok(())
        }
    }
}
