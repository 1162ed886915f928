//! The scheduler loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info};

use belltower_exec::{ExecutionResult, Executor};
use belltower_schedule::{next_fire_time, Moment};

use crate::clock::Clock;
use crate::job::{Job, JobId};
use crate::registry::Registry;

/// Polling granularity of the due-job check. Fire-time accuracy is within
/// one tick.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives registered jobs at ±1 s precision until told to stop.
///
/// The engine owns its jobs outright: it is the only writer of `next_fire`,
/// and it updates that state synchronously within its own tick, so no
/// locking is needed anywhere in the loop. Command executions run on
/// detached tasks and communicate outcomes through logging only —
/// fire-and-forget, at most once per due occurrence, with overlapping runs
/// of the same job allowed across successive occurrences.
pub struct SchedulerEngine<C: Clock> {
    jobs: Vec<Job>,
    executor: Arc<dyn Executor>,
    clock: C,
}

impl<C: Clock> SchedulerEngine<C> {
    /// Build an engine from a closed registry.
    ///
    /// Consuming the registry is what freezes the job set: once the engine
    /// exists there is no handle left to register through.
    pub fn new(registry: Registry, executor: Arc<dyn Executor>, clock: C) -> Self {
        Self {
            jobs: registry.into_jobs(),
            executor,
            clock,
        }
    }

    /// Main loop. Polls every second until `shutdown` observes `true`.
    ///
    /// In-flight command executions are not cancelled on shutdown; only
    /// future dispatch stops.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(jobs = self.jobs.len(), "scheduler engine started");
        self.seed_next_fires();

        let mut interval = tokio::time::interval(TICK_PERIOD);
        loop {
            tokio::select! {
                _ = interval.tick() => self.tick(),
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduler engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    // --- private helpers ---------------------------------------------------

    /// Compute the initial fire time for every job.
    ///
    /// A job whose schedule has no future occurrence is disabled here with
    /// an error log; it never affects the loop or its siblings.
    fn seed_next_fires(&mut self) {
        let now = self.clock.now();
        for job in &mut self.jobs {
            job.next_fire = next_fire_time(&job.moment, now);
            match job.next_fire {
                Some(at) => {
                    info!(job = %job.id, moment = %job.moment, command = %job.command, next = %at, "job scheduled")
                }
                None => {
                    error!(job = %job.id, moment = %job.moment, "schedule has no future occurrence; job will never run")
                }
            }
        }
    }

    /// Dispatch every job whose fire time has arrived and recompute its next
    /// occurrence.
    fn tick(&mut self) {
        let now = self.clock.now();

        for job in &mut self.jobs {
            let Some(due) = job.next_fire else { continue };
            if due > now {
                continue;
            }

            let executor = Arc::clone(&self.executor);
            let id = job.id.clone();
            let command = job.command.clone();
            tokio::spawn(async move {
                let result = executor.execute(&command).await;
                log_outcome(&id, &result);
            });

            // Recompute immediately, before the execution finishes: fire N+1
            // is gated on this write, not on the command's exit. Calendar
            // moments advance from the scheduled instant so dispatch latency
            // never drifts the boundary; intervals chain from actual time.
            let reference = match job.moment {
                Moment::Every(_) => now,
                _ => due,
            };
            job.next_fire = next_fire_time(&job.moment, reference);
            match job.next_fire {
                Some(next) => debug!(job = %job.id, next = %next, "next fire computed"),
                None => {
                    error!(job = %job.id, moment = %job.moment, "schedule exhausted; job will not fire again")
                }
            }
        }
    }
}

fn log_outcome(id: &JobId, result: &ExecutionResult) {
    if result.success {
        info!(job = %id, command = %result.command, output = %result.output, "command executed");
    } else {
        error!(
            job = %id,
            command = %result.command,
            error = result.error.as_deref().unwrap_or("unknown"),
            output = %result.output,
            "command failed"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use async_trait::async_trait;
    use belltower_schedule::parse_moment;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    /// Records every command it is asked to run; commands containing
    /// `boom` report failure, everything else succeeds.
    struct RecordingExecutor {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingExecutor {
        fn new() -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
            let log = Arc::new(Mutex::new(Vec::new()));
            (
                Arc::new(Self {
                    log: Arc::clone(&log),
                }),
                log,
            )
        }
    }

    #[async_trait]
    impl Executor for RecordingExecutor {
        async fn execute(&self, command: &str) -> ExecutionResult {
            self.log.lock().unwrap().push(command.to_string());
            let success = !command.contains("boom");
            ExecutionResult {
                command: command.to_string(),
                success,
                output: String::new(),
                error: (!success).then(|| "exit status 127".to_string()),
            }
        }
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    /// Give detached execution tasks a chance to run until `log` holds
    /// `expected` entries (bounded, so a bug fails the test instead of
    /// hanging it).
    async fn drain_until(log: &Arc<Mutex<Vec<String>>>, expected: usize) {
        for _ in 0..100 {
            if log.lock().unwrap().len() >= expected {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn hourly_fires_exactly_once_and_advances() {
        let clock = ManualClock::new(utc(2026, 8, 7, 10, 30, 0));
        let (executor, log) = RecordingExecutor::new();

        let mut registry = Registry::new();
        registry.register(parse_moment("@hourly").unwrap(), "echo hello");
        let mut engine = SchedulerEngine::new(registry, executor, clock.clone());

        engine.seed_next_fires();
        assert_eq!(engine.jobs[0].next_fire, Some(utc(2026, 8, 7, 11, 0, 0)));

        // Not due yet: nothing dispatched.
        engine.tick();
        drain_until(&log, 1).await;
        assert!(log.lock().unwrap().is_empty());

        // Cross the boundary: exactly one dispatch, next fire one hour on.
        clock.set(utc(2026, 8, 7, 11, 0, 0));
        engine.tick();
        drain_until(&log, 1).await;
        assert_eq!(log.lock().unwrap().as_slice(), ["echo hello"]);
        assert_eq!(engine.jobs[0].next_fire, Some(utc(2026, 8, 7, 12, 0, 0)));

        // Same tick boundary again: no refire for the same occurrence.
        engine.tick();
        drain_until(&log, 2).await;
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn simultaneous_jobs_both_fire_despite_one_failing() {
        let t0 = utc(2026, 8, 7, 10, 0, 0);
        let clock = ManualClock::new(t0);
        let (executor, log) = RecordingExecutor::new();

        let mut registry = Registry::new();
        registry.register(parse_moment("@every:5s").unwrap(), "boom");
        registry.register(parse_moment("@every:5s").unwrap(), "echo ok");
        let mut engine = SchedulerEngine::new(registry, executor, clock.clone());

        engine.seed_next_fires();
        clock.advance(std::time::Duration::from_secs(5));
        engine.tick();
        drain_until(&log, 2).await;

        let recorded = log.lock().unwrap().clone();
        assert_eq!(recorded, ["boom", "echo ok"]);

        // The failing job did not disturb either job's recomputation.
        let expected = Some(t0 + chrono::Duration::seconds(10));
        assert_eq!(engine.jobs[0].next_fire, expected);
        assert_eq!(engine.jobs[1].next_fire, expected);
    }

    #[tokio::test]
    async fn interval_chains_from_actual_fire_time() {
        let t0 = utc(2026, 8, 7, 10, 0, 0);
        let clock = ManualClock::new(t0);
        let (executor, log) = RecordingExecutor::new();

        let mut registry = Registry::new();
        registry.register(parse_moment("@every:5s").unwrap(), "echo tick");
        let mut engine = SchedulerEngine::new(registry, executor, clock.clone());
        engine.seed_next_fires();

        // The tick observes the job 3 s late; the chain shifts forward
        // rather than bursting to catch up.
        clock.set(t0 + chrono::Duration::seconds(8));
        engine.tick();
        drain_until(&log, 1).await;
        assert_eq!(
            engine.jobs[0].next_fire,
            Some(t0 + chrono::Duration::seconds(13))
        );
    }

    #[tokio::test]
    async fn exhausted_cron_schedule_disables_only_that_job() {
        let clock = ManualClock::new(utc(2026, 8, 7, 10, 0, 0));
        let (executor, log) = RecordingExecutor::new();

        let mut registry = Registry::new();
        // Year field pinned to the past: no future occurrence exists.
        registry.register(parse_moment("0 0 0 1 1 * 2020").unwrap(), "echo never");
        registry.register(parse_moment("@every:5s").unwrap(), "echo alive");
        let mut engine = SchedulerEngine::new(registry, executor, clock.clone());

        engine.seed_next_fires();
        assert!(engine.jobs[0].next_fire.is_none());
        assert!(engine.jobs[1].next_fire.is_some());

        clock.advance(std::time::Duration::from_secs(5));
        engine.tick();
        drain_until(&log, 1).await;
        assert_eq!(log.lock().unwrap().as_slice(), ["echo alive"]);
    }

    #[tokio::test(start_paused = true)]
    async fn run_fires_when_clock_crosses_boundary_and_stops_on_signal() {
        let t0 = utc(2026, 8, 7, 10, 0, 0);
        let clock = ManualClock::new(t0);
        let (executor, log) = RecordingExecutor::new();

        let mut registry = Registry::new();
        registry.register(parse_moment("@every:5s").unwrap(), "echo tick");
        let engine = SchedulerEngine::new(registry, executor, clock.clone());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(engine.run(shutdown_rx));

        // Two virtual seconds of ticking with a stationary clock: idle.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(log.lock().unwrap().is_empty());

        // Move the clock past the boundary and let the loop tick again.
        clock.advance(Duration::from_secs(6));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(log.lock().unwrap().as_slice(), ["echo tick"]);

        // Stop: the task completes and pending fires are abandoned.
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
