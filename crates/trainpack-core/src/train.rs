use crate::command::run_command;
use crate::config::RunConfig;
use crate::error::{PipelineError, TrainpackResult};
use crate::layout::RunLayout;
use crate::preflight::RunPaths;
use tracing::{error, info};

/// Invoke the external training program and wait for it to finish.
///
/// The model output directory's parent is created up front; everything the
/// program writes under `<result_dir>/model` is opaque to this stage. Any
/// non-zero exit status is terminal.
pub fn run_training(
    config: &RunConfig,
    paths: &RunPaths,
    layout: &RunLayout,
) -> TrainpackResult<()> {
    let model_path = layout.saved_model_dir();
    std::fs::create_dir_all(layout.model_dir())
        .map_err(|err| PipelineError::TrainingSpawn(format!("could not create model directory: {err}")))?;

    let Some((program, leading)) = config.trainer.split_first() else {
        return Err(PipelineError::TrainingSpawn("trainer command is empty".to_string()));
    };

    let mut args: Vec<String> = leading.to_vec();
    args.push("--data_path".to_string());
    args.push(paths.data_dir.display().to_string());
    args.push("--model_path".to_string());
    args.push(model_path.display().to_string());
    args.push("--epochs".to_string());
    args.push(config.epochs.to_string());

    info!("starting training run with {} ({} epochs)", program, config.epochs);
    let outcome = run_command(program, &args)
        .map_err(|err| PipelineError::TrainingSpawn(format!("{program}: {err}")))?;

    if !outcome.success() {
        if !outcome.stderr.is_empty() {
            error!("training program stderr:\n{}", outcome.stderr.trim_end());
        }
        return Err(PipelineError::Training { status: outcome.status });
    }

    info!("training program finished successfully");
    Ok(())
}
