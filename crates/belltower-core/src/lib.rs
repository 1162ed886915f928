//! `belltower-core` — host-facing configuration for the scheduler.
//!
//! Two layers live here: [`config::BelltowerConfig`] (the `belltower.toml` +
//! `BELLTOWER_*` environment overlay) and [`directive`] (the tab-file
//! grammar, one `<moment> <command…>` rule per line). Everything in this
//! crate runs once at setup, and every error is fatal to setup: either the
//! whole tab registers, or nothing does.

pub mod config;
pub mod directive;
pub mod error;

pub use config::{BelltowerConfig, SchedulerConfig};
pub use directive::Directive;
pub use error::{ConfigError, Result};
