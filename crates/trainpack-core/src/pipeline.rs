use crate::checkpoint;
use crate::config::RunConfig;
use crate::deps;
use crate::error::TrainpackResult;
use crate::layout::RunLayout;
use crate::package;
use crate::preflight;
use crate::train;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Summary of a successful run, printed as JSON under `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub archive_path: PathBuf,
    pub checkpoint_patched: bool,
    pub epochs: u32,
    pub framework: String,
}

/// Execute the whole pipeline, strictly in order:
/// preflight, install, train, checkpoint patch, stage + archive + cleanup.
///
/// Every stage failure short-circuits the rest; only the checkpoint patch is
/// best effort.
pub fn run(config: &RunConfig) -> TrainpackResult<RunReport> {
    let started_at = Utc::now();

    let paths = preflight::check_environment(config)?;
    let layout = RunLayout::new(&paths.result_dir);
    info!("run layout rooted at {}", layout.result_dir().display());

    deps::install_requirements(config);
    train::run_training(config, &paths, &layout)?;
    let checkpoint_patched = checkpoint::patch_checkpoint(&layout);
    let archive_path = package::stage_and_archive(&layout, &config.framework)?;

    let finished_at = Utc::now();
    Ok(RunReport {
        started_at,
        finished_at,
        duration_secs: (finished_at - started_at).num_milliseconds() as f64 / 1000.0,
        archive_path,
        checkpoint_patched,
        epochs: config.epochs,
        framework: config.framework.clone(),
    })
}
