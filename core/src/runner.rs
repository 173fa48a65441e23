//! Outbound seam to the external tools.
//!
//! Components never build shell strings: a program name and an argument
//! vector go through [`CommandRunner::run`], which makes user-supplied values
//! plain arguments rather than shell syntax.

use std::process::Command;

use pcislot_common::error::{PciSlotError, Result};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    /// Runs `program` to completion.
    ///
    /// Fails with [`PciSlotError::ToolUnavailable`] only when the program
    /// cannot be started; a non-zero exit is reported through the output.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs programs on the host.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(program, ?args, "running external command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| PciSlotError::tool(program, e.to_string()))?;

        let result = CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        debug!(program, status = ?result.status, "external command finished");

        Ok(result)
    }
}

/// Runs an enumerator and returns its stdout, turning a failed exit into
/// [`PciSlotError::ToolUnavailable`].
pub fn run_checked(runner: &dyn CommandRunner, program: &str, args: &[&str]) -> Result<String> {
    let output = runner.run(program, args)?;
    if !output.success {
        let reason = match output.stderr.trim() {
            "" => format!("exited with status {:?}", output.status),
            stderr => stderr.to_string(),
        };
        return Err(PciSlotError::tool(program, reason));
    }
    Ok(output.stdout)
}
