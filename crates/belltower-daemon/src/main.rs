//! `belltowerd` — reference host for the belltower scheduler.
//!
//! Loads configuration, parses the tab file, and drives the engine until a
//! shutdown signal arrives. Any configuration problem aborts startup before
//! a single job is registered; once running, job failures only ever show up
//! in the log stream.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use belltower_core::BelltowerConfig;
use belltower_engine::{Registry, SchedulerEngine, SystemClock};
use belltower_exec::ShellExecutor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "belltower_daemon=info,belltower_engine=info,belltower_exec=info".into()
                }),
        )
        .init();

    // load config: explicit BELLTOWER_CONFIG env > ~/.belltower/belltower.toml
    let config_path = std::env::var("BELLTOWER_CONFIG").ok();
    let config = BelltowerConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        BelltowerConfig::default()
    });

    // Setup is all-or-nothing: a bad tab line means no jobs run at all.
    let directives = config
        .load_tab()
        .with_context(|| format!("invalid tab file {}", config.scheduler.tab))?;

    let mut registry = Registry::new();
    for directive in directives {
        registry.register(directive.moment, directive.command);
    }

    if registry.is_empty() {
        info!(tab = %config.scheduler.tab, "no scheduled tasks configured; scheduler will not start");
        tokio::signal::ctrl_c().await?;
        return Ok(());
    }

    info!(jobs = registry.len(), shell = %config.scheduler.shell, "starting scheduler");

    let executor = Arc::new(ShellExecutor::new(&config.scheduler.shell));
    let engine = SchedulerEngine::new(registry, executor, SystemClock);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let engine_task = tokio::spawn(engine.run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    // Stop future dispatch; in-flight commands are left to finish on their own.
    let _ = shutdown_tx.send(true);
    let _ = engine_task.await;

    Ok(())
}
