//! `belltower-schedule` — moment grammar and next-fire-time evaluation.
//!
//! # Overview
//!
//! A *moment* is the textual half of a schedule directive (`@daily`,
//! `@every:5m`, or a six-field cron pattern). [`parse::parse_moment`]
//! normalizes the text into a [`Moment`] descriptor and
//! [`eval::next_fire_time`] computes the next occurrence strictly after a
//! reference instant. Both are pure functions; the engine crate owns all
//! state and timing.
//!
//! # Moment variants
//!
//! | Variant | Behaviour                                            |
//! |---------|------------------------------------------------------|
//! | `Alias` | Fixed calendar pattern (`@yearly` … `@hourly`)       |
//! | `Every` | Repeat every fixed span, chained from the last fire  |
//! | `Cron`  | Explicit six/seven-field cron expression             |

pub mod error;
pub mod eval;
pub mod parse;
pub mod types;

pub use error::{Result, ScheduleError};
pub use eval::next_fire_time;
pub use parse::parse_moment;
pub use types::{Alias, Moment};
