use thiserror::Error;

use belltower_schedule::ScheduleError;

/// Setup-time errors. All of them abort initialization before any job runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The tab file exists but could not be read.
    #[error("cannot read tab file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file / environment extraction failed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A directive line could not be split into moment and command.
    #[error("tab line {line}: {reason}")]
    MalformedDirective { line: usize, reason: String },

    /// A directive had a moment but no command tokens after it.
    #[error("tab line {line}: missing command after moment `{moment}`")]
    MissingCommand { line: usize, moment: String },

    /// The moment failed schedule-grammar validation.
    #[error("tab line {line}: {source}")]
    Schedule {
        line: usize,
        #[source]
        source: ScheduleError,
    },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
