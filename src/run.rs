use std::path::Path;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

use conduct_io::encode::{EncodingError, SnapshotWriter};
use conduct_solver::{PlateConfig, Simulation, StepObserver};

/// Writes the snapshot and ticks the progress bar.
struct Observer {
    writer: SnapshotWriter,
    progress: ProgressBar,
}

impl StepObserver for Observer {
    type Error = EncodingError;

    fn snapshot(&mut self, sim: &Simulation) -> Result<(), EncodingError> {
        self.progress.suspend(|| self.writer.encode_snapshot(sim))
    }

    fn stepped(&mut self, step: u64) {
        self.progress.set_position(step);
    }
}

pub fn run(config: &PlateConfig, output: &Path, show_progress: bool) -> anyhow::Result<()> {
    let mut sim = Simulation::new(config).context("invalid plate configuration")?;
    let writer = SnapshotWriter::new(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    let bar_template = "Running Simulation {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template)?
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(sim.schedule().iterations()).with_style(style);
    if !show_progress {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }

    let mut observer = Observer { writer, progress };
    sim.run(&mut observer)
        .with_context(|| format!("failed to write {}", output.display()))?;
    observer.progress.finish();

    if !observer.writer.is_written() {
        anyhow::bail!("no snapshot was taken");
    }
    info!(t = sim.time(), output = %output.display(), "done");

    Ok(())
}
