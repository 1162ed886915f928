//! The `Executor` trait and its shell-backed implementation.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::output;
use crate::types::ExecutionResult;

/// Runs one command per firing, concurrently with other firings.
///
/// Implementations must be infallible at the signature level: whatever goes
/// wrong is reported inside the [`ExecutionResult`], never raised to the
/// scheduler loop.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, command: &str) -> ExecutionResult;
}

/// Executes commands through a shell interpreter (`<shell> -c <command>`).
///
/// Pipes, redirection, and other shell metacharacters in the command string
/// are honored, exactly as an operator writing a crontab line would expect.
/// No timeout is imposed: a hung command occupies its own task until it
/// exits.
pub struct ShellExecutor {
    shell: String,
    max_output_chars: usize,
}

impl ShellExecutor {
    /// Create an executor that spawns `shell -c <command>`.
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            max_output_chars: output::DEFAULT_MAX_OUTPUT_CHARS,
        }
    }

    /// Override the per-stream captured-output bound.
    pub fn with_max_output_chars(mut self, max_output_chars: usize) -> Self {
        self.max_output_chars = max_output_chars;
        self
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new("sh")
    }
}

#[async_trait]
impl Executor for ShellExecutor {
    async fn execute(&self, command: &str) -> ExecutionResult {
        debug!(shell = %self.shell, %command, "spawning command");

        let spawned = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn();

        let child = match spawned {
            Ok(child) => child,
            Err(e) => return ExecutionResult::failed(command, format!("spawn failed: {e}")),
        };

        let collected = match child.wait_with_output().await {
            Ok(collected) => collected,
            Err(e) => return ExecutionResult::failed(command, format!("wait failed: {e}")),
        };

        let stdout = output::clip(&output::clean(&collected.stdout), self.max_output_chars);
        let stderr = output::clip(&output::clean(&collected.stderr), self.max_output_chars);

        if collected.status.success() {
            ExecutionResult {
                command: command.to_string(),
                success: true,
                output: stdout,
                error: (!stderr.is_empty()).then_some(stderr),
            }
        } else {
            // `code()` is None when the child was killed by a signal.
            let status = match collected.status.code() {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            };
            let reason = if stderr.is_empty() {
                status
            } else {
                format!("{status}: {}", stderr.trim_end())
            };
            ExecutionResult {
                command: command.to_string(),
                success: false,
                output: stdout,
                error: Some(reason),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
