//! The pre-start job registry.

use tracing::info;

use belltower_schedule::Moment;

use crate::job::{Job, JobId};

/// Insertion-ordered set of jobs, populated before the engine starts.
///
/// The registry stores only pre-validated moments (parsing happens upstream
/// in the config layer), so registration cannot fail. It is consumed by
/// value when the engine is built: there is no way to register into a
/// running scheduler.
#[derive(Debug, Default)]
pub struct Registry {
    jobs: Vec<Job>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job. Iteration keeps insertion order, so log output across
    /// ticks is deterministic.
    pub fn register(&mut self, moment: Moment, command: impl Into<String>) -> JobId {
        let job = Job::new(moment, command.into());
        let id = job.id.clone();
        info!(job = %id, moment = %job.moment, command = %job.command, "job registered");
        self.jobs.push(job);
        id
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Snapshot view, mainly for hosts that want to report what they loaded.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub(crate) fn into_jobs(self) -> Vec<Job> {
        self.jobs
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
