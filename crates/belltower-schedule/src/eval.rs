//! Next-fire-time evaluation.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};

use crate::types::{Alias, Moment};

/// Compute the next UTC fire time for `moment` strictly after `after`.
///
/// Deterministic for a given `(moment, after)` pair and never returns a
/// timestamp less than or equal to `after` — an `after` that lands exactly
/// on a boundary advances to the following occurrence, so the same instant
/// is never fired twice.
///
/// Returns `None` only when the schedule has no future occurrence (possible
/// for `Cron` expressions pinned to a date in the past); `Alias` and `Every`
/// always produce a next time.
pub fn next_fire_time(moment: &Moment, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match moment {
        Moment::Alias(alias) => next_alias_fire(*alias, after),

        // Plain addition: no calendar alignment, no drift correction. The
        // caller feeds back the actual last fire time, so delays shift the
        // whole chain forward instead of causing catch-up bursts.
        Moment::Every(span) => Some(after + Duration::from_std(*span).ok()?),

        Moment::Cron { schedule, .. } => schedule.after(&after).next(),
    }
}

fn next_alias_fire(alias: Alias, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match alias {
        Alias::Hourly => {
            // Top of the current hour is <= `after`, so the next boundary is
            // always exactly one hour later.
            let floor = Utc
                .with_ymd_and_hms(
                    after.year(),
                    after.month(),
                    after.day(),
                    after.hour(),
                    0,
                    0,
                )
                .single()?;
            Some(floor + Duration::hours(1))
        }

        Alias::Daily => Some(midnight_of(after)? + Duration::days(1)),

        Alias::Weekly => {
            // Next Sunday midnight. `num_days_from_sunday` is 0 on Sunday,
            // so a reference already on Sunday advances a full week.
            let days_ahead = 7 - i64::from(after.weekday().num_days_from_sunday());
            Some(midnight_of(after)? + Duration::days(days_ahead))
        }

        Alias::Monthly => {
            let (year, month) = if after.month() == 12 {
                (after.year() + 1, 1)
            } else {
                (after.year(), after.month() + 1)
            };
            Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
        }

        Alias::Yearly => Utc.with_ymd_and_hms(after.year() + 1, 1, 1, 0, 0, 0).single(),
    }
}

fn midnight_of(t: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(t.year(), t.month(), t.day(), 0, 0, 0).single()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
