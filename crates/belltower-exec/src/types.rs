//! Shared data types for belltower-exec.

use serde::{Deserialize, Serialize};

/// Outcome of one command firing.
///
/// Ephemeral: the scheduler logs it and drops it. Nothing is persisted and
/// there is no history API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The command string exactly as it was handed to the shell.
    pub command: String,

    /// `true` iff the process spawned and exited with status 0.
    pub success: bool,

    /// Captured standard output, ANSI-stripped and length-bounded.
    pub output: String,

    /// Diagnostic for failures (spawn error, exit status, captured stderr).
    /// On success this carries stderr when the command wrote any.
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Build a failure result for a command that never produced output.
    pub(crate) fn failed(command: &str, reason: String) -> Self {
        Self {
            command: command.to_string(),
            success: false,
            output: String::new(),
            error: Some(reason),
        }
    }
}
