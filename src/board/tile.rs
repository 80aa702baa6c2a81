//! Tile types.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::board::UserId;

/// Static role of a tile on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    /// Ordinary tile.
    Blank,
    /// Banner tile, tracked in the availability report.
    Banner,
    /// Relic tile, tracked in the availability report.
    Relic,
}

impl TileType {
    /// Lower-case name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Banner => "banner",
            Self::Relic => "relic",
        }
    }

    /// Banners and relics are the only tiles the availability report follows.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        matches!(self, Self::Banner | Self::Relic)
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active claim: who holds the tile and since when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// Claimant.
    pub by: UserId,
    /// When the claim was made or last extended.
    pub at: DateTime<Utc>,
}

impl Claim {
    /// Minutes until the claim lapses given the configured claim duration.
    ///
    /// Negative once the claim has lapsed.
    #[must_use]
    pub fn remaining_minutes(&self, now: DateTime<Utc>, duration: TimeDelta) -> f64 {
        minutes_between(now, self.at + duration)
    }
}

/// A single tile on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Canonical upper-case name.
    pub name: String,
    /// Static role, fixed at initialization.
    pub tile_type: TileType,
    /// Active claim, if any.
    pub claim: Option<Claim>,
    /// When ownership of the tile lapses, if it is being counted down.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Tile {
    /// Create an unclaimed, unowned blank tile.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tile_type: TileType::Blank,
            claim: None,
            expires_at: None,
        }
    }

    /// Claimant id, if claimed.
    #[must_use]
    pub fn claimed_by(&self) -> Option<&str> {
        self.claim.as_ref().map(|claim| claim.by.as_str())
    }

    /// Claim timestamp, if claimed.
    #[must_use]
    pub fn claimed_at(&self) -> Option<DateTime<Utc>> {
        self.claim.as_ref().map(|claim| claim.at)
    }

    /// Minutes until ownership lapses, if the tile has an expiry.
    #[must_use]
    pub fn minutes_until_expiry(&self, now: DateTime<Utc>) -> Option<f64> {
        self.expires_at.map(|expires_at| minutes_between(now, expires_at))
    }

    /// Neither claimed nor counting down.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.claim.is_none() && self.expires_at.is_none()
    }
}

#[allow(clippy::cast_precision_loss)]
fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}

/// Round to whole minutes, halves rounding up (so `-0.5` becomes `0`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_minutes(minutes: f64) -> i64 {
    (minutes + 0.5).floor() as i64
}
