use crate::config::{DATA_DIR_ENV, RESULT_DIR_ENV, RunConfig};
use crate::error::{PipelineError, TrainpackResult};
use std::path::{Path, PathBuf};

/// Directory pair validated by preflight. Later stages take this instead of
/// re-checking the optional config fields.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub data_dir: PathBuf,
    pub result_dir: PathBuf,
}

/// Validate the two required directories. Runs before every other stage and
/// has no side effects on success.
pub fn check_environment(config: &RunConfig) -> TrainpackResult<RunPaths> {
    let data_dir = require_dir(DATA_DIR_ENV, config.data_dir.as_deref())?;
    let result_dir = require_dir(RESULT_DIR_ENV, config.result_dir.as_deref())?;
    Ok(RunPaths { data_dir, result_dir })
}

fn require_dir(name: &str, value: Option<&Path>) -> TrainpackResult<PathBuf> {
    let Some(path) = value else {
        return Err(PipelineError::Environment(format!("{name} is not set")));
    };
    if !path.is_dir() {
        return Err(PipelineError::Environment(format!(
            "{name} is not an existing directory: {}",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}
