use thiserror::Error;

pub type TrainpackResult<T> = std::result::Result<T, PipelineError>;

/// Terminal failures of the run pipeline. Every variant maps to a distinct
/// process exit code; no stage retries.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("environment error: {0}")]
    Environment(String),

    #[error("training program exited with status {status}")]
    Training { status: i32 },

    #[error("training program could not be started: {0}")]
    TrainingSpawn(String),

    /// Reserved for a future post-processing check; nothing raises it today.
    #[error("post-processing failed: {0}")]
    PostProcessing(String),

    #[error("packaging failed: {0}")]
    Packaging(String),

    #[error("customization error: {0}")]
    Customization(String),
}

impl PipelineError {
    /// Process exit code for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Training { .. } | Self::TrainingSpawn(_) => 1,
            Self::PostProcessing(_) => 2,
            Self::Packaging(_) => 3,
            Self::Customization(_) => 4,
            Self::Environment(_) => 5,
        }
    }
}
