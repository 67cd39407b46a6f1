use std::io;
use std::process::Command;
use tracing::debug;

/// Structured result of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Process exit status; -1 when the child was killed by a signal.
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Run an external command to completion, blocking the caller.
///
/// There is deliberately no timeout and no cancellation: the whole pipeline is
/// one synchronous process, and an operator aborts it from outside.
pub fn run_command(program: &str, args: &[String]) -> io::Result<CommandOutcome> {
    debug!("running: {} {}", program, args.join(" "));

    let output = Command::new(program).args(args).output()?;
    let outcome = CommandOutcome {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if !outcome.stdout.is_empty() {
        debug!("{} stdout:\n{}", program, outcome.stdout.trim_end());
    }
    if !outcome.stderr.is_empty() {
        debug!("{} stderr:\n{}", program, outcome.stderr.trim_end());
    }
    Ok(outcome)
}
