//! `belltower-exec` — shell command execution for scheduled jobs.
//!
//! The [`Executor`] trait is the seam between the scheduler loop and the
//! operating system: one async call per firing, returning an
//! [`ExecutionResult`] and nothing else. This crate has no error type —
//! spawn failures, non-zero exits, and I/O errors are all folded into the
//! result, so a broken command can never take the scheduler loop down.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use belltower_exec::{Executor, ShellExecutor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let executor = ShellExecutor::default();
//!     let result = executor.execute("echo hello").await;
//!     assert!(result.success);
//!     println!("{}", result.output);
//! }
//! ```

pub mod executor;
pub mod output;
pub mod types;

pub use executor::{Executor, ShellExecutor};
pub use types::ExecutionResult;
