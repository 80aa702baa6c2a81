//! `HOURS:MINUTES` durations reported by players.

use std::str::FromStr;

use chrono::TimeDelta;
use thiserror::Error;

/// Error parsing an `HOURS:MINUTES` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected HOURS:MINUTES, got {0:?}")]
pub struct TimeSpecError(String);

/// Time left until a tile expires, as typed by a player (`06:01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiresIn {
    /// Whole hours.
    pub hours: u32,
    /// Minutes on top of the hours. Not limited to `0..60`.
    pub minutes: u32,
}

impl ExpiresIn {
    /// Total length, or `None` if it does not fit in a [`TimeDelta`].
    #[must_use]
    pub fn as_delta(self) -> Option<TimeDelta> {
        let total = u64::from(self.hours) * 60 + u64::from(self.minutes);
        TimeDelta::try_minutes(i64::try_from(total).ok()?)
    }
}

impl FromStr for ExpiresIn {
    type Err = TimeSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeSpecError(s.to_string());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            hours: parse_component(hours).ok_or_else(invalid)?,
            minutes: parse_component(minutes).ok_or_else(invalid)?,
        })
    }
}

fn parse_component(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
