//! Trainpack CLI - orchestrate one model training run
//!
//! Validates the environment, installs the training requirements, invokes the
//! external training program, patches the checkpoint index, and packages the
//! trained artifacts into a single downloadable archive.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use trainpack_core::config::{
    DEFAULT_EPOCHS, DEFAULT_FRAMEWORK, DEFAULT_REQUIREMENTS_FILE, DEFAULT_TRAINER_COMMAND,
};
use trainpack_core::{pipeline, RunConfig};

/// Run one model training job and package its artifacts.
///
/// Required inputs come from the DATA_DIR and RESULT_DIR environment
/// variables; the matching flags take precedence when given.
#[derive(Parser, Debug)]
#[command(
    name = "trainpack",
    version,
    about = "Run one model training job and package its artifacts"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Training data directory (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Result directory for all artifacts (overrides RESULT_DIR)
    #[arg(long)]
    result_dir: Option<PathBuf>,

    /// Epoch count passed to the training program
    #[arg(long, default_value_t = DEFAULT_EPOCHS)]
    epochs: u32,

    /// Training command: program plus leading arguments
    #[arg(long, default_value = DEFAULT_TRAINER_COMMAND)]
    trainer: String,

    /// Package manifest installed before training
    #[arg(long, default_value = DEFAULT_REQUIREMENTS_FILE)]
    requirements: PathBuf,

    /// Framework label used in the archive layout
    #[arg(long, default_value = DEFAULT_FRAMEWORK)]
    framework: String,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    // Logs go to stderr; stdout is reserved for the run report.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = RunConfig::from_env();
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(dir) = args.result_dir {
        config.result_dir = Some(dir);
    }
    config.epochs = args.epochs;
    config.set_trainer_command(&args.trainer);
    config.requirements = args.requirements;
    config.framework = args.framework;

    match pipeline::run(&config) {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!();
                println!("{}", "Training run complete".bold().green());
                println!("  Archive: {}", report.archive_path.display().to_string().cyan());
                println!();
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".bold().red());
            std::process::exit(err.exit_code());
        }
    }
}
