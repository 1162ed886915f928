use thiserror::Error;

/// Errors produced while parsing a moment expression.
///
/// Every variant is fatal to setup: a directive that fails moment parsing
/// aborts registration of the whole tab (no partial registration).
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// More than one `:` separator, or an `@every` form without a duration.
    #[error("malformed moment `{0}`")]
    MalformedMoment(String),

    /// The `@every` duration failed to parse or was not strictly positive.
    #[error("invalid duration `{text}`: {reason}")]
    InvalidDuration { text: String, reason: String },

    /// A non-alias moment failed cron-expression validation.
    #[error("invalid cron pattern `{text}`: {reason}")]
    InvalidPattern { text: String, reason: String },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;
