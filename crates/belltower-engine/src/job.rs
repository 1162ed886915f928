//! Job records and identifiers.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use belltower_schedule::Moment;

// ---------------------------------------------------------------------------
// JobId
// ---------------------------------------------------------------------------

/// Opaque identifier for a registered job.
///
/// Wraps a `String` so the internal representation can change without
/// breaking callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a fresh random job ID (UUIDv4).
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// A registered `(moment, command)` pair plus its scheduling state.
///
/// The pair is immutable for the life of the process; `next_fire` is the
/// only mutable field and is written exclusively by the engine task.
#[derive(Debug, Clone)]
pub struct Job {
    /// Identifier used in log lines.
    pub id: JobId,

    /// When the job runs.
    pub moment: Moment,

    /// Command string handed verbatim to the shell on each firing.
    pub command: String,

    /// Next planned fire time; `None` means the job will never fire
    /// (schedule exhausted, or never computable — logged once by the
    /// engine and skipped thereafter).
    pub next_fire: Option<DateTime<Utc>>,
}

impl Job {
    pub(crate) fn new(moment: Moment, command: String) -> Self {
        Self {
            id: JobId::new(),
            moment,
            command,
            next_fire: None,
        }
    }
}
