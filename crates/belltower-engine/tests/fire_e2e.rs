// End-to-end: a registered job crossing its boundary runs the real shell
// command exactly once and captures its output.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::watch;

use belltower_engine::{ManualClock, Registry, SchedulerEngine};
use belltower_exec::{ExecutionResult, Executor, ShellExecutor};
use belltower_schedule::parse_moment;

/// Delegates to the real shell executor and keeps every result for the test
/// to inspect.
struct CapturingExecutor {
    inner: ShellExecutor,
    results: Arc<Mutex<Vec<ExecutionResult>>>,
}

impl CapturingExecutor {
    fn new() -> (Arc<Self>, Arc<Mutex<Vec<ExecutionResult>>>) {
        let results = Arc::new(Mutex::new(Vec::new()));
        (
            Arc::new(Self {
                inner: ShellExecutor::default(),
                results: Arc::clone(&results),
            }),
            results,
        )
    }
}

#[async_trait]
impl Executor for CapturingExecutor {
    async fn execute(&self, command: &str) -> ExecutionResult {
        let result = self.inner.execute(command).await;
        self.results.lock().unwrap().push(result.clone());
        result
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn hourly_job_fires_once_with_captured_output() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 8, 7, 10, 30, 0).unwrap());
    let (executor, results) = CapturingExecutor::new();

    let mut registry = Registry::new();
    registry.register(parse_moment("@hourly").unwrap(), "echo hello");
    assert_eq!(registry.len(), 1);

    let engine = SchedulerEngine::new(registry, executor, clock.clone());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let engine_task = tokio::spawn(engine.run(shutdown_rx));

    // Before the boundary the loop ticks but dispatches nothing.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(results.lock().unwrap().is_empty());

    // Cross the hour boundary and give the loop time to tick and the child
    // process time to exit.
    clock.set(Utc.with_ymd_and_hms(2026, 8, 7, 11, 0, 1).unwrap());
    tokio::time::sleep(Duration::from_millis(2500)).await;

    {
        let captured = results.lock().unwrap();
        assert_eq!(captured.len(), 1, "exactly one firing per due occurrence");
        assert!(captured[0].success);
        assert!(captured[0].output.contains("hello"));
    }

    // The next occurrence is an hour away; more ticking must not refire.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(results.lock().unwrap().len(), 1);

    shutdown_tx.send(true).unwrap();
    engine_task.await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_job_does_not_delay_its_neighbour() {
    let t0 = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
    let clock = ManualClock::new(t0);
    let (executor, results) = CapturingExecutor::new();

    let mut registry = Registry::new();
    registry.register(
        parse_moment("@every:5s").unwrap(),
        "belltower-no-such-command-x9",
    );
    registry.register(parse_moment("@every:5s").unwrap(), "echo survivor");

    let engine = SchedulerEngine::new(registry, executor, clock.clone());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let engine_task = tokio::spawn(engine.run(shutdown_rx));

    clock.advance(Duration::from_secs(6));
    tokio::time::sleep(Duration::from_millis(2500)).await;

    {
        let captured = results.lock().unwrap();
        assert_eq!(captured.len(), 2, "both due jobs fired in the same tick");

        let failed = captured
            .iter()
            .find(|r| r.command.contains("no-such-command"))
            .unwrap();
        assert!(!failed.success);
        assert!(failed.error.is_some());

        let survivor = captured.iter().find(|r| r.command == "echo survivor").unwrap();
        assert!(survivor.success);
        assert!(survivor.output.contains("survivor"));
    }

    shutdown_tx.send(true).unwrap();
    engine_task.await.unwrap();
}
