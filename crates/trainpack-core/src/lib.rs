//! Trainpack Core
//!
//! Building blocks for orchestrating a single model training run:
//! - Run configuration and artifact layout (`RunConfig`, `RunLayout`)
//! - Structured external command execution (`CommandOutcome`)
//! - The sequential pipeline stages: preflight, deps, train, checkpoint, package
//! - The error taxonomy that drives the process exit-code contract

pub mod checkpoint;
pub mod command;
pub mod config;
pub mod deps;
pub mod error;
pub mod layout;
pub mod package;
pub mod pipeline;
pub mod preflight;
pub mod train;

pub use command::{run_command, CommandOutcome};
pub use config::RunConfig;
pub use error::{PipelineError, TrainpackResult};
pub use layout::RunLayout;
pub use pipeline::{run, RunReport};
pub use preflight::RunPaths;
