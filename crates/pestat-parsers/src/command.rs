//! Command execution utilities for scheduler and directory queries.

use thiserror::Error;
use tokio::process::Command;

/// Error type for command execution.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to execute {command}: {error}")]
    Execution { command: String, error: String },
    #[error("Command {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// Captured stdout together with the exit code of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Execute a command and return stdout as a string.
///
/// Non-zero exit is an error carrying the command's stderr.
pub async fn run_command(cmd: &mut Command, name: &str) -> Result<String, CommandError> {
    let output = cmd.output().await.map_err(|e| CommandError::Execution {
        command: name.to_string(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CommandError::Failed {
            command: name.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    tracing::debug!("{} returned {} bytes", name, output.stdout.len());
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Execute a command and return stdout plus exit code without judging it.
///
/// Lookups like `getent` use a non-zero exit to say "no such key", which
/// the caller has to tell apart from a failure to spawn at all.
pub async fn run_command_status(
    cmd: &mut Command,
    name: &str,
) -> Result<CommandOutput, CommandError> {
    let output = cmd.output().await.map_err(|e| CommandError::Execution {
        command: name.to_string(),
        error: e.to_string(),
    })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        code: output.status.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_command_success() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");
        let result = run_command(&mut cmd, "echo").await.unwrap();
        assert_eq!(result.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_command_not_found() {
        let mut cmd = Command::new("nonexistent_command_12345");
        let result = run_command(&mut cmd, "nonexistent").await;
        assert!(matches!(result, Err(CommandError::Execution { .. })));
    }

    #[tokio::test]
    async fn test_run_command_nonzero_exit() {
        let mut cmd = Command::new("false");
        let result = run_command(&mut cmd, "false").await;
        assert!(matches!(result, Err(CommandError::Failed { .. })));
    }

    #[tokio::test]
    async fn test_run_command_status_keeps_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo partial; exit 2"]);
        let output = run_command_status(&mut cmd, "sh").await.unwrap();
        assert_eq!(output.code, Some(2));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "partial");
    }
}
