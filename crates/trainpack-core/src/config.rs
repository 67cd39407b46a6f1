use std::path::PathBuf;

/// Environment variable naming the training data directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
/// Environment variable naming the result directory.
pub const RESULT_DIR_ENV: &str = "RESULT_DIR";

pub const DEFAULT_TRAINER_COMMAND: &str = "python3 train.py";
pub const DEFAULT_REQUIREMENTS_FILE: &str = "training_requirements.txt";
pub const DEFAULT_FRAMEWORK: &str = "tensorflow";
pub const DEFAULT_EPOCHS: u32 = 10;

/// Configuration for one training run, constructed once at startup and passed
/// through every stage.
///
/// `data_dir` and `result_dir` stay optional here; the preflight stage is the
/// single place that decides whether they are usable.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: Option<PathBuf>,
    pub result_dir: Option<PathBuf>,
    /// Epoch count forwarded to the training program.
    pub epochs: u32,
    /// Training command: program plus leading arguments. The pipeline appends
    /// `--data_path`, `--model_path` and `--epochs`.
    pub trainer: Vec<String>,
    /// Package manifest installed before training.
    pub requirements: PathBuf,
    /// Framework label used in the staged archive layout. Empty means the
    /// layout template was never filled in and packaging must refuse to run.
    pub framework: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            result_dir: None,
            epochs: DEFAULT_EPOCHS,
            trainer: split_command(DEFAULT_TRAINER_COMMAND),
            requirements: PathBuf::from(DEFAULT_REQUIREMENTS_FILE),
            framework: DEFAULT_FRAMEWORK.to_string(),
        }
    }
}

impl RunConfig {
    /// Build a config from the process environment. CLI flags applied on top
    /// of this take precedence.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: env_path(DATA_DIR_ENV),
            result_dir: env_path(RESULT_DIR_ENV),
            ..Self::default()
        }
    }

    /// Replace the training command with a whitespace-split command line.
    pub fn set_trainer_command(&mut self, raw: &str) {
        self.trainer = split_command(raw);
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
