//! Moment grammar parsing.
//!
//! A moment is split on `:` into at most two segments. Single segments are
//! either a predefined alias token or a cron expression; two segments are the
//! `@every:<duration>` form. Anything else is rejected here, before a job is
//! ever registered — a typo'd schedule fails setup loudly instead of
//! producing a job that silently never fires.

use std::str::FromStr;

use crate::error::{Result, ScheduleError};
use crate::types::{Alias, Moment, EVERY_TOKEN};

/// Parse a moment expression into a normalized [`Moment`].
///
/// Pure function; every error maps to a setup-fatal `ScheduleError`.
pub fn parse_moment(text: &str) -> Result<Moment> {
    let segments: Vec<&str> = text.split(':').collect();

    match segments.as_slice() {
        [single] => parse_single(single),
        [head, duration] if *head == EVERY_TOKEN => parse_every(duration),
        // Two segments with a non-@every head, or three or more segments.
        _ => Err(ScheduleError::MalformedMoment(text.to_string())),
    }
}

fn parse_single(text: &str) -> Result<Moment> {
    if let Some(alias) = Alias::from_token(text) {
        return Ok(Moment::Alias(alias));
    }

    // `@every` with no duration segment.
    if text == EVERY_TOKEN {
        return Err(ScheduleError::MalformedMoment(text.to_string()));
    }

    let schedule =
        cron::Schedule::from_str(text).map_err(|e| ScheduleError::InvalidPattern {
            text: text.to_string(),
            reason: e.to_string(),
        })?;

    Ok(Moment::Cron {
        source: text.to_string(),
        schedule: Box::new(schedule),
    })
}

fn parse_every(text: &str) -> Result<Moment> {
    let span = humantime::parse_duration(text).map_err(|e| ScheduleError::InvalidDuration {
        text: text.to_string(),
        reason: e.to_string(),
    })?;

    if span.is_zero() {
        return Err(ScheduleError::InvalidDuration {
            text: text.to_string(),
            reason: "duration must be strictly positive".to_string(),
        });
    }

    Ok(Moment::Every(span))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
