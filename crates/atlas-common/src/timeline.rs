//! The active time window governing which observations are aggregated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Start/end/current instants plus the range-vs-single mode flag.
///
/// In single mode callers keep start = end = current by convention;
/// `start <= end` is expected but deliberately not validated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub current: DateTime<Utc>,
    pub is_range: bool,
}

impl TimeWindow {
    /// A single-instant window.
    pub fn single(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: instant,
            current: instant,
            is_range: false,
        }
    }

    /// A range window with `current` pinned to the end.
    pub fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            current: end,
            is_range: true,
        }
    }

    /// The default window: the trailing 15 days, single mode.
    pub fn trailing_default(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(15),
            end: now,
            current: now,
            is_range: false,
        }
    }

    /// Merge a partial update, leaving unset instants untouched.
    pub fn apply(&mut self, patch: TimeWindowPatch) {
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(current) = patch.current {
            self.current = current;
        }
        if let Some(is_range) = patch.is_range {
            self.is_range = is_range;
        }
    }
}

/// Partial update for the time window.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TimeWindowPatch {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub current: Option<DateTime<Utc>>,
    pub is_range: Option<bool>,
}
