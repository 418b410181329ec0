// render/calc.rs

//! # Countdown and Progress Calculations
//!
//! Numeric helpers behind the visual section: time remaining until a target
//! timestamp and the fill percentage of a progress bar. Both degrade instead
//! of failing: an unparseable target date counts as expired and a
//! non-positive maximum yields 0%.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Time left until a countdown target, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub expired: bool,
}

impl Remaining {
    fn expired() -> Self {
        Self {
            expired: true,
            ..Self::default()
        }
    }

    /// Whole seconds represented by the four units.
    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// Computes the time left until `target_iso`, measured from `now`.
///
/// All four units come from a single delta, so they stay consistent with each
/// other. A target at or before `now`, or one that cannot be parsed, is
/// expired with every unit at zero.
pub fn remaining(target_iso: &str, now: DateTime<Utc>) -> Remaining {
    let Some(target) = parse_target(target_iso) else {
        debug!("Unparseable countdown target [{}], treating as expired", target_iso);
        return Remaining::expired();
    };
    if target <= now {
        return Remaining::expired();
    }

    let diff_ms = (target - now).num_milliseconds();
    let days = diff_ms / MS_PER_DAY;
    let rest = diff_ms % MS_PER_DAY;
    let hours = rest / MS_PER_HOUR;
    let rest = rest % MS_PER_HOUR;
    let minutes = rest / MS_PER_MINUTE;
    let rest = rest % MS_PER_MINUTE;
    let seconds = rest / MS_PER_SECOND;

    Remaining {
        days,
        hours,
        minutes,
        seconds,
        expired: false,
    }
}

/// Parses RFC 3339, a zone-less `YYYY-MM-DDTHH:MM[:SS[.fff]]` (read as UTC),
/// or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_target(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `round(current / max * 100)`, clamped to `[0, 100]`. Returns 0 when `max`
/// is not positive or either input is not finite.
pub fn percentage(current: f64, max: f64) -> u8 {
    if !current.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0;
    }
    clamp_percent((current / max * 100.0).round())
}

/// Clamps an explicit percentage to `[0, 100]`, rounding to the nearest whole.
pub fn clamp_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
