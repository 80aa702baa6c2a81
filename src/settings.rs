//! Tunable durations and report limits.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Engine settings.
///
/// Every field has a default, so a config file only needs to list the values
/// it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long claims exist before they're automatically removed, in minutes.
    pub claim_duration_minutes: u32,
    /// Claiming an owned tile with more than this many minutes of ownership
    /// left adds a warning to the claim message.
    pub remaining_owned_warning_minutes: u32,
    /// How long a captured tile stays owned, in minutes.
    pub capture_duration_minutes: u32,
    /// Minimum time between two sweeps, in seconds.
    pub sweep_interval_seconds: u32,
    /// Number of soonest-expiring tiles kept in the report.
    pub expiring_limit: usize,
    /// Number of available tiles printed before the "more..." line.
    pub available_display_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            claim_duration_minutes: 30,
            remaining_owned_warning_minutes: 120,
            capture_duration_minutes: 24 * 60,
            sweep_interval_seconds: 60,
            expiring_limit: 10,
            available_display_limit: 10,
        }
    }
}

impl Settings {
    /// Claim duration as a time delta.
    #[must_use]
    pub fn claim_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.claim_duration_minutes))
    }

    /// Ownership window granted by a capture.
    #[must_use]
    pub fn capture_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.capture_duration_minutes))
    }

    /// Minimum time between sweeps.
    #[must_use]
    pub fn sweep_interval(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.sweep_interval_seconds))
    }
}
