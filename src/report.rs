//! Availability report: which banners and relics are claimed, free or about
//! to turn neutral.
//!
//! The three partitions are derived from [`State`] and cached until the
//! engine marks the cache dirty. Remaining-time columns are computed when the
//! report is rendered, so a cached partition still shows current minutes.

use chrono::{DateTime, Utc};

use crate::board::{State, Tile, round_minutes};
use crate::settings::Settings;

/// Derived partitions of the board, as tile names in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    /// Tiles with an active claim, of any type.
    pub claimed: Vec<String>,
    /// Banners and relics with no claim and no expiry.
    pub available: Vec<String>,
    /// Unclaimed banners and relics with an expiry, soonest first.
    pub expiring: Vec<String>,
}

impl Availability {
    /// Compute all three partitions.
    #[must_use]
    pub fn compute(state: &State, expiring_limit: usize) -> Self {
        Self {
            claimed: claimed_tiles(state),
            available: available_tiles(state),
            expiring: soon_expiring_tiles(state, expiring_limit),
        }
    }
}

/// Names of every claimed tile.
#[must_use]
pub fn claimed_tiles(state: &State) -> Vec<String> {
    state
        .tiles()
        .filter(|tile| tile.claim.is_some())
        .map(|tile| tile.name.clone())
        .collect()
}

/// Names of banners and relics that are neither claimed nor counting down.
#[must_use]
pub fn available_tiles(state: &State) -> Vec<String> {
    state
        .tiles()
        .filter(|tile| tile.tile_type.is_tracked() && tile.is_neutral())
        .map(|tile| tile.name.clone())
        .collect()
}

/// Up to `limit` unclaimed banners and relics with an expiry, soonest first.
///
/// Ties keep registry order.
#[must_use]
pub fn soon_expiring_tiles(state: &State, limit: usize) -> Vec<String> {
    let mut expiring: Vec<(&Tile, DateTime<Utc>)> = state
        .tiles()
        .filter(|tile| tile.tile_type.is_tracked() && tile.claim.is_none())
        .filter_map(|tile| tile.expires_at.map(|at| (tile, at)))
        .collect();
    expiring.sort_by_key(|&(_, at)| at);
    expiring
        .into_iter()
        .take(limit)
        .map(|(tile, _)| tile.name.clone())
        .collect()
}

/// Lazily recomputed [`Availability`].
#[derive(Debug, Clone)]
pub struct AvailabilityCache {
    dirty: bool,
    snapshot: Availability,
    recomputations: u64,
}

impl Default for AvailabilityCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityCache {
    /// An empty cache that recomputes on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: true,
            snapshot: Availability::default(),
            recomputations: 0,
        }
    }

    /// Force the next [`get`](Self::get) to recompute.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether the next [`get`](Self::get) will recompute.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// How many times the partitions have been computed.
    #[must_use]
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Current partitions, recomputed first if dirty.
    pub fn get(&mut self, state: &State, expiring_limit: usize) -> &Availability {
        if self.dirty {
            self.snapshot = Availability::compute(state, expiring_limit);
            self.recomputations += 1;
            self.dirty = false;
        }
        &self.snapshot
    }
}

const NONE: &str = "None";

/// Render the report text shown in chat.
///
/// `now` is both the reference for remaining times and the "last updated"
/// stamp.
#[must_use]
pub fn render_report(
    state: &State,
    availability: &Availability,
    settings: &Settings,
    now: DateTime<Utc>,
) -> String {
    let claimed = availability
        .claimed
        .iter()
        .filter_map(|name| state.tile(name))
        .filter_map(|tile| {
            let claim = tile.claim.as_ref()?;
            let claimant = state
                .user(&claim.by)
                .map_or("Unknown", |user| user.display_name.as_str());
            let claim_left = round_minutes(claim.remaining_minutes(now, settings.claim_duration()));
            let owned_left = tile
                .minutes_until_expiry(now)
                .map_or_else(|| "-".to_string(), |m| format!("{}m", round_minutes(m)));
            Some(format!(
                "{}, {}, {claimant}, {claim_left}m, {owned_left}",
                tile.name, tile.tile_type
            ))
        })
        .collect::<Vec<_>>();

    let available = availability
        .available
        .iter()
        .take(settings.available_display_limit)
        .filter_map(|name| state.tile(name))
        .map(|tile| format!("{}, {}", tile.name, tile.tile_type))
        .collect::<Vec<_>>();
    let hidden = availability
        .available
        .len()
        .saturating_sub(settings.available_display_limit);
    let more = if hidden > 0 {
        format!("\n{hidden} more...")
    } else {
        String::new()
    };

    let expiring = availability
        .expiring
        .iter()
        .filter_map(|name| state.tile(name))
        .filter_map(|tile| {
            let left = round_minutes(tile.minutes_until_expiry(now)?);
            Some(format!("{}, {}, {left}m", tile.name, tile.tile_type))
        })
        .collect::<Vec<_>>();

    format!(
        "**Claimed Tiles**\n\
         *Tile, Type, Claimed By, Claim Expires In, Tile Expires In*\n\
         {}\n\
         \n\
         **Available Relics and Banners**\n\
         *Tile, Type*\n\
         {}{more}\n\
         \n\
         **Expiring Soon**\n\
         *Tile, Type, Tile Expires In*\n\
         {}\n\
         \n\
         Last updated: <t:{}:R>. To update this message, use the \"/available\" command.\n",
        section(&claimed),
        section(&available),
        section(&expiring),
        now.timestamp(),
    )
}

fn section(rows: &[String]) -> String {
    if rows.is_empty() {
        NONE.to_string()
    } else {
        rows.join("\n")
    }
}
