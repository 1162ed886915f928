//! Schedule descriptor types.

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Alias
// ---------------------------------------------------------------------------

/// Predefined calendar schedules, each equivalent to a fixed six-field cron
/// pattern (`sec min hour dom month dow`, second pinned to 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias {
    /// Once a year, midnight UTC, Jan 1 (`0 0 0 1 1 *`).
    Yearly,
    /// Once a month, midnight UTC, first of month (`0 0 0 1 * *`).
    Monthly,
    /// Once a week, midnight UTC between Sat/Sun (`0 0 0 * * 0`).
    Weekly,
    /// Once a day at midnight UTC (`0 0 0 * * *`).
    Daily,
    /// Once an hour at the top of the hour (`0 0 * * * *`).
    Hourly,
}

impl Alias {
    /// Resolve a directive token to an alias.
    ///
    /// Matching is exact and case-sensitive; the synonyms `@annually` and
    /// `@midnight` collapse to [`Alias::Yearly`] and [`Alias::Daily`].
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "@yearly" | "@annually" => Some(Alias::Yearly),
            "@monthly" => Some(Alias::Monthly),
            "@weekly" => Some(Alias::Weekly),
            "@daily" | "@midnight" => Some(Alias::Daily),
            "@hourly" => Some(Alias::Hourly),
            _ => None,
        }
    }

    /// The canonical token for this alias (synonyms are not preserved).
    pub fn token(&self) -> &'static str {
        match self {
            Alias::Yearly => "@yearly",
            Alias::Monthly => "@monthly",
            Alias::Weekly => "@weekly",
            Alias::Daily => "@daily",
            Alias::Hourly => "@hourly",
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// ---------------------------------------------------------------------------
// Moment
// ---------------------------------------------------------------------------

/// Token that introduces a fixed-interval moment (`@every:<duration>`).
pub const EVERY_TOKEN: &str = "@every";

/// Normalized descriptor of when a job runs.
#[derive(Debug, Clone)]
pub enum Moment {
    /// One of the predefined calendar schedules.
    Alias(Alias),

    /// Re-fire every fixed span, chained from the previous fire time.
    ///
    /// Invariant: the span is strictly positive (enforced at parse time).
    Every(Duration),

    /// An explicit cron expression, validated at parse time.
    Cron {
        /// Original expression text, kept for display and logging.
        source: String,
        /// Parsed schedule used by the evaluator.
        schedule: Box<cron::Schedule>,
    },
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moment::Alias(alias) => write!(f, "{alias}"),
            Moment::Every(span) => {
                write!(f, "{EVERY_TOKEN}:{}", humantime::format_duration(*span))
            }
            Moment::Cron { source, .. } => write!(f, "{source}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
