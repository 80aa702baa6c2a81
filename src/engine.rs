//! Claim/capture engine.
//!
//! Owns the [`State`], the clock and the availability cache, and applies
//! the tile lifecycle:
//!
//! ```text
//!            claim                 capture
//! Neutral ─────────────► Claimed ─────────────► Owned(expires_at)
//!    ▲                     │  ▲ claim (same user: extend,      │
//!    │      unclaim /      │  │        other user: force)      │
//!    ├──── sweep (lapsed) ─┘  └────────────────────────────────┤
//!    │                                                         │
//!    └──────────────────── sweep (expired) ────────────────────┘
//! ```
//!
//! Every operation validates first and writes last, so a rejected operation
//! leaves the state untouched. Any write marks the availability cache dirty.

mod time_spec;

pub use time_spec::{ExpiresIn, TimeSpecError};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::board::{Claim, LayoutError, MapLayout, State, Tile, User, round_minutes};
use crate::clock::{Clock, SystemClock};
use crate::error::{CommandResult, ErrorKind, Rejection};
use crate::report::{Availability, AvailabilityCache, render_report};
use crate::settings::Settings;

/// What a sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Claims cleared because their duration ran out.
    pub claims_expired: usize,
    /// Ownership windows cleared because they reached their expiry.
    pub ownerships_expired: usize,
}

impl SweepSummary {
    /// Whether the sweep changed any tile.
    #[must_use]
    pub const fn changed_anything(&self) -> bool {
        self.claims_expired > 0 || self.ownerships_expired > 0
    }
}

/// The tile claim state machine.
#[derive(Debug)]
pub struct Engine<C: Clock = SystemClock> {
    layout: MapLayout,
    settings: Settings,
    clock: C,
    state: State,
    availability: AvailabilityCache,
    last_sweep_at: DateTime<Utc>,
}

impl Engine<SystemClock> {
    /// Create an engine on the system clock.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the layout is inconsistent.
    pub fn with_system_clock(layout: MapLayout, settings: Settings) -> Result<Self, LayoutError> {
        Self::new(layout, settings, SystemClock)
    }
}

impl<C: Clock> Engine<C> {
    /// Build the registry from `layout` and start the sweep window at the
    /// clock's current time.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the layout is inconsistent.
    pub fn new(layout: MapLayout, settings: Settings, clock: C) -> Result<Self, LayoutError> {
        let state = State::new(&layout)?;
        let last_sweep_at = clock.now();
        debug!(tiles = state.tile_count(), "tile registry initialized");

        Ok(Self {
            layout,
            settings,
            clock,
            state,
            availability: AvailabilityCache::new(),
            last_sweep_at,
        })
    }

    /// Throw away all tiles, users and cached data and rebuild from the layout.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the layout is inconsistent.
    pub fn reinitialize(&mut self) -> Result<(), LayoutError> {
        self.state = State::new(&self.layout)?;
        self.availability = AvailabilityCache::new();
        self.last_sweep_at = self.clock.now();
        debug!(tiles = self.state.tile_count(), "tile registry reinitialized");
        Ok(())
    }

    /// Current state, read-only.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The clock the engine reads time from.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// When the last sweep ran (or the engine was built).
    #[must_use]
    pub const fn last_sweep_at(&self) -> DateTime<Utc> {
        self.last_sweep_at
    }

    /// How many times the availability partitions have been computed.
    #[must_use]
    pub const fn availability_recomputations(&self) -> u64 {
        self.availability.recomputations()
    }

    /// Claim a tile, extend one's own claim, or with `force` take over
    /// someone else's.
    pub fn claim_tile(&mut self, tile: Option<&str>, user: &User, force: bool) -> CommandResult {
        finish("claim", self.try_claim(tile, user, force))
    }

    /// Release a claim without capturing; `force` releases someone else's.
    pub fn unclaim_tile(&mut self, tile: Option<&str>, user: &User, force: bool) -> CommandResult {
        finish("unclaim", self.try_unclaim(tile, user, force))
    }

    /// Turn one's own claim into an ownership window.
    pub fn capture_tile(&mut self, tile: Option<&str>, user: &User) -> CommandResult {
        finish("capture", self.try_capture(tile, user))
    }

    /// Flag a tile as taken by a rival: its expiry becomes now.
    ///
    /// Applies whatever the tile's current claim or ownership.
    pub fn report_taken(&mut self, tile: Option<&str>, user: &User) -> CommandResult {
        finish("report_taken", self.try_report_taken(tile, user))
    }

    /// Record how long until a tile turns neutral, as `HOURS:MINUTES`.
    pub fn set_expires_in(
        &mut self,
        tile: Option<&str>,
        user: &User,
        expires_in: Option<&str>,
    ) -> CommandResult {
        finish(
            "set_expires_in",
            self.try_set_expires_in(tile, user, expires_in),
        )
    }

    /// Expire lapsed claims and ownerships.
    ///
    /// Does nothing and returns `None` if the previous sweep was less than
    /// the sweep interval ago.
    pub fn update(&mut self) -> Option<SweepSummary> {
        let now = self.clock.now();
        if now - self.last_sweep_at < self.settings.sweep_interval() {
            return None;
        }
        self.last_sweep_at = now;

        let claim_duration = self.settings.claim_duration();
        let mut summary = SweepSummary::default();
        for tile in self.state.tiles.values_mut() {
            if tile
                .claim
                .as_ref()
                .is_some_and(|claim| claim.remaining_minutes(now, claim_duration) <= 0.0)
            {
                tile.claim = None;
                summary.claims_expired += 1;
            }
            if tile.minutes_until_expiry(now).is_some_and(|left| left <= 0.0) {
                tile.expires_at = None;
                summary.ownerships_expired += 1;
            }
        }

        self.availability.invalidate();
        if summary.changed_anything() {
            info!(
                claims = summary.claims_expired,
                ownerships = summary.ownerships_expired,
                "sweep expired tiles"
            );
        }
        Some(summary)
    }

    /// Claimed, available and soon-expiring partitions, from cache if clean.
    pub fn availability(&mut self) -> &Availability {
        self.availability.get(&self.state, self.settings.expiring_limit)
    }

    /// The availability report as display text.
    pub fn available_tiles(&mut self) -> CommandResult {
        let now = self.clock.now();
        let availability = self.availability.get(&self.state, self.settings.expiring_limit);
        CommandResult::ok(render_report(&self.state, availability, &self.settings, now))
    }

    fn tile(&self, key: &str) -> Result<&Tile, Rejection> {
        self.state.tile(key).ok_or_else(|| missing_record(key))
    }

    fn tile_mut(&mut self, key: &str) -> Result<&mut Tile, Rejection> {
        self.state.tile_mut(key).ok_or_else(|| missing_record(key))
    }

    fn claim_minutes_left(&self, claim: &Claim, now: DateTime<Utc>) -> i64 {
        round_minutes(claim.remaining_minutes(now, self.settings.claim_duration()))
    }

    fn try_claim(
        &mut self,
        tile: Option<&str>,
        user: &User,
        force: bool,
    ) -> Result<String, Rejection> {
        let key = self.state.resolve(tile)?;
        let now = self.clock.now();
        let name = &user.display_name;
        let duration = self.settings.claim_duration_minutes;
        let current = self.tile(&key)?;

        let message = match &current.claim {
            None => {
                let mut message = format!("✅ {name} claimed tile {key} for {duration} min.");
                let owned_left = current.minutes_until_expiry(now).unwrap_or_default();
                if owned_left > f64::from(self.settings.remaining_owned_warning_minutes) {
                    message = format!(
                        "{message}\n⚠️ Tile {key} may still be owned for another {} minutes.",
                        round_minutes(owned_left)
                    );
                }
                message
            }
            Some(claim) if claim.by == user.id => format!(
                "✅ Extended {name}'s claim for tile {key}. Remaining duration: {duration} min."
            ),
            Some(claim) => {
                let claimant = self.state.display_name(&claim.by)?;
                if !force {
                    return Err(Rejection::new(
                        ErrorKind::TileIsClaimedByAnotherUser,
                        format!(
                            "⚠️ Tile {key} is claimed by {claimant} for another {} minutes. Do you wish to claim it anyway?",
                            self.claim_minutes_left(claim, now)
                        ),
                    ));
                }
                format!("⚠️ {name} forcefully claimed tile {key}. Previously claimed by {claimant}.")
            }
        };

        self.state.register_user(user);
        self.tile_mut(&key)?.claim = Some(Claim {
            by: user.id.clone(),
            at: now,
        });
        self.availability.invalidate();
        debug!(tile = %key, user = %user.id, force, "tile claimed");
        Ok(message)
    }

    fn try_unclaim(
        &mut self,
        tile: Option<&str>,
        user: &User,
        force: bool,
    ) -> Result<String, Rejection> {
        let key = self.state.resolve(tile)?;
        let now = self.clock.now();
        let name = &user.display_name;

        let message = match &self.tile(&key)?.claim {
            None => {
                return Err(Rejection::new(
                    ErrorKind::TileIsNotClaimed,
                    format!("❌ Can't unclaim tile {key}: the tile is not claimed."),
                ));
            }
            Some(claim) if claim.by == user.id => format!(
                "✅ {name} removed claim from tile {key} without capturing. The tile may now be claimed by another user."
            ),
            Some(claim) => {
                let claimant = self.state.display_name(&claim.by)?;
                if !force {
                    return Err(Rejection::new(
                        ErrorKind::TileIsClaimedByAnotherUser,
                        format!(
                            "⚠️ The tile {key} is claimed by {claimant} for another {} minutes. Do you wish to unclaim it anyway?",
                            self.claim_minutes_left(claim, now)
                        ),
                    ));
                }
                format!(
                    "⚠️ {name} forcefully removed claim from tile {key} which was previously claimed by {claimant}."
                )
            }
        };

        self.state.register_user(user);
        self.tile_mut(&key)?.claim = None;
        self.availability.invalidate();
        debug!(tile = %key, user = %user.id, force, "tile unclaimed");
        Ok(message)
    }

    fn try_capture(&mut self, tile: Option<&str>, user: &User) -> Result<String, Rejection> {
        let key = self.state.resolve(tile)?;
        let now = self.clock.now();

        match &self.tile(&key)?.claim {
            None => {
                return Err(Rejection::new(
                    ErrorKind::TileIsNotClaimed,
                    format!(
                        "❌ Tiles must be claimed before capturing. Please claim it first with \"/claim {key}\""
                    ),
                ));
            }
            Some(claim) if claim.by != user.id => {
                let claimant = self.state.display_name(&claim.by)?;
                return Err(Rejection::new(
                    ErrorKind::TileIsClaimedByAnotherUser,
                    format!(
                        "❌ This tile is claimed by {claimant}. If you wish to capture it, override their claim with \"/claim {key}\"."
                    ),
                ));
            }
            Some(_) => {}
        }

        let expires_at = now
            .checked_add_signed(self.settings.capture_duration())
            .ok_or_else(|| {
                Rejection::new(
                    ErrorKind::InternalError,
                    "❌ Internal error: capture expiry is out of range.",
                )
            })?;

        self.state.register_user(user);
        let tile = self.tile_mut(&key)?;
        tile.claim = None;
        tile.expires_at = Some(expires_at);
        self.availability.invalidate();
        debug!(tile = %key, user = %user.id, %expires_at, "tile captured");
        Ok(format!(
            "✅ {} captured tile {key}. Great work monke strategist!",
            user.display_name
        ))
    }

    fn try_report_taken(&mut self, tile: Option<&str>, user: &User) -> Result<String, Rejection> {
        let key = self.state.resolve(tile)?;
        let now = self.clock.now();

        self.state.register_user(user);
        self.tile_mut(&key)?.expires_at = Some(now);
        self.availability.invalidate();
        debug!(tile = %key, user = %user.id, "tile reported taken");
        Ok(
            "✅ Thank you for reporting. Players searching for tiles to capture will be notified."
                .to_string(),
        )
    }

    fn try_set_expires_in(
        &mut self,
        tile: Option<&str>,
        user: &User,
        expires_in: Option<&str>,
    ) -> Result<String, Rejection> {
        let key = self.state.resolve(tile)?;
        let Some(expires_in) = expires_in.map(str::trim).filter(|s| !s.is_empty()) else {
            return Err(Rejection::new(
                ErrorKind::MissingParameter,
                "❌ The `time` left until the tile expires must be specified.",
            ));
        };

        let now = self.clock.now();
        let unprocessable = || {
            Rejection::new(
                ErrorKind::UnprocessableParameter,
                "❌ Please format the time remaining as HOURS:MINUTES, for example 06:23",
            )
        };
        let expires_at = expires_in
            .parse::<ExpiresIn>()
            .ok()
            .and_then(ExpiresIn::as_delta)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or_else(unprocessable)?;

        self.state.register_user(user);
        self.tile_mut(&key)?.expires_at = Some(expires_at);
        self.availability.invalidate();
        debug!(tile = %key, user = %user.id, %expires_at, "tile expiry reported");
        Ok(
            "✅ Thank you for reporting. This helps us recapture tiles as soon as they turn neutral."
                .to_string(),
        )
    }
}

fn missing_record(key: &str) -> Rejection {
    Rejection::new(
        ErrorKind::InternalError,
        format!("❌ Internal error: tile {key} has no record"),
    )
}

fn finish(operation: &str, result: Result<String, Rejection>) -> CommandResult {
    if let Err(rejection) = &result {
        if rejection.kind == ErrorKind::InternalError {
            warn!(operation, message = %rejection.message, "internal error");
        } else {
            debug!(operation, kind = %rejection.kind, "operation rejected");
        }
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileType, check_invariants};
    use crate::clock::ManualClock;
    use chrono::TimeDelta;

    fn start() -> DateTime<Utc> {
        "2022-01-01T00:00:00Z".parse().unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn vrej() -> User {
        User::new("discordUserA", "vrej")
    }

    fn sadge() -> User {
        User::new("discordUserB", "sadge")
    }

    fn engine() -> (Engine<ManualClock>, ManualClock) {
        let clock = ManualClock::new(start());
        let engine = Engine::new(MapLayout::default(), Settings::default(), clock.clone()).unwrap();
        (engine, clock)
    }

    fn first_banner(engine: &Engine<ManualClock>) -> String {
        engine
            .state()
            .tiles()
            .find(|t| t.tile_type == TileType::Banner)
            .map(|t| t.name.clone())
            .unwrap()
    }

    #[test]
    fn test_claim_unclaimed_tile() {
        let (mut engine, _) = engine();
        let result = engine.claim_tile(Some("AAB"), &vrej(), false);
        assert_eq!(result.error, None);
        assert_eq!(result.message, "✅ vrej claimed tile AAB for 30 min.");

        let tile = engine.state().tile("AAB").unwrap();
        assert_eq!(tile.claimed_by(), Some("discordUserA"));
        assert_eq!(tile.claimed_at(), Some(start()));

        let result = engine.claim_tile(Some("ACB"), &sadge(), false);
        assert_eq!(result.message, "✅ sadge claimed tile ACB for 30 min.");
    }

    #[test]
    fn test_claim_uses_canonical_name() {
        let (mut engine, _) = engine();
        let result = engine.claim_tile(Some("aab"), &vrej(), false);
        assert_eq!(result.message, "✅ vrej claimed tile AAB for 30 min.");
    }

    #[test]
    fn test_extend_claim() {
        let (mut engine, clock) = engine();
        engine.claim_tile(Some("AAB"), &vrej(), false);
        clock.advance(TimeDelta::minutes(20));

        let result = engine.claim_tile(Some("AAB"), &vrej(), false);
        assert_eq!(result.error, None);
        assert_eq!(
            result.message,
            "✅ Extended vrej's claim for tile AAB. Remaining duration: 30 min."
        );
        assert_eq!(
            engine.state().tile("AAB").unwrap().claimed_at(),
            Some(start() + TimeDelta::minutes(20))
        );
    }

    #[test]
    fn test_claim_conflict() {
        let (mut engine, _) = engine();
        engine.claim_tile(Some("AAB"), &sadge(), false);

        let result = engine.claim_tile(Some("AAB"), &vrej(), false);
        assert_eq!(result.error, Some(ErrorKind::TileIsClaimedByAnotherUser));
        assert_eq!(
            result.message,
            "⚠️ Tile AAB is claimed by sadge for another 30 minutes. Do you wish to claim it anyway?"
        );
        assert_eq!(
            engine.state().tile("AAB").unwrap().claimed_by(),
            Some("discordUserB")
        );
        assert!(engine.state().user("discordUserA").is_none());
    }

    #[test]
    fn test_force_claim() {
        let (mut engine, _) = engine();
        engine.claim_tile(Some("AAB"), &sadge(), false);

        let result = engine.claim_tile(Some("AAB"), &vrej(), true);
        assert_eq!(result.error, None);
        assert_eq!(
            result.message,
            "⚠️ vrej forcefully claimed tile AAB. Previously claimed by sadge."
        );
        assert_eq!(
            engine.state().tile("AAB").unwrap().claimed_by(),
            Some("discordUserA")
        );
    }

    #[test]
    fn test_claim_owned_tile_warns() {
        let (mut engine, _) = engine();
        engine.set_expires_in(Some("ACA"), &sadge(), Some("03:00"));

        let result = engine.claim_tile(Some("ACA"), &vrej(), false);
        assert_eq!(result.error, None);
        assert_eq!(
            result.message,
            "✅ vrej claimed tile ACA for 30 min.\n⚠️ Tile ACA may still be owned for another 180 minutes."
        );

        engine.set_expires_in(Some("ACB"), &sadge(), Some("01:00"));
        let result = engine.claim_tile(Some("ACB"), &vrej(), false);
        assert_eq!(result.message, "✅ vrej claimed tile ACB for 30 min.");
    }

    #[test]
    fn test_missing_and_unknown_tiles() {
        let (mut engine, _) = engine();
        let missing = engine.claim_tile(None, &vrej(), false);
        assert_eq!(missing.error, Some(ErrorKind::MissingParameter));
        assert_eq!(missing.message, "❌ The `tile` parameter is required.");

        let unknown = engine.capture_tile(Some("AGB"), &vrej());
        assert_eq!(unknown.error, Some(ErrorKind::TileDoesNotExist));
        assert_eq!(unknown.message, "❌ Tile AGB doesn't exist");

        assert_eq!(
            engine.report_taken(Some(""), &vrej()).error,
            Some(ErrorKind::MissingParameter)
        );
        assert_eq!(engine.state().user_count(), 0);
    }

    #[test]
    fn test_unclaim() {
        let (mut engine, _) = engine();
        engine.claim_tile(Some("AAB"), &vrej(), false);

        let result = engine.unclaim_tile(Some("AAB"), &vrej(), false);
        assert_eq!(result.error, None);
        assert_eq!(
            result.message,
            "✅ vrej removed claim from tile AAB without capturing. The tile may now be claimed by another user."
        );
        assert!(engine.state().tile("AAB").unwrap().is_neutral());
    }

    #[test]
    fn test_unclaim_unclaimed_tile() {
        let (mut engine, _) = engine();
        let result = engine.unclaim_tile(Some("AAB"), &vrej(), false);
        assert_eq!(result.error, Some(ErrorKind::TileIsNotClaimed));
        assert_eq!(
            result.message,
            "❌ Can't unclaim tile AAB: the tile is not claimed."
        );
    }

    #[test]
    fn test_unclaim_someone_elses_claim() {
        let (mut engine, clock) = engine();
        engine.claim_tile(Some("AAB"), &vrej(), false);
        clock.advance(TimeDelta::seconds(10 * 60 + 20));

        let result = engine.unclaim_tile(Some("AAB"), &sadge(), false);
        assert_eq!(result.error, Some(ErrorKind::TileIsClaimedByAnotherUser));
        assert_eq!(
            result.message,
            "⚠️ The tile AAB is claimed by vrej for another 20 minutes. Do you wish to unclaim it anyway?"
        );
        assert!(engine.state().tile("AAB").unwrap().claim.is_some());

        let result = engine.unclaim_tile(Some("AAB"), &sadge(), true);
        assert_eq!(result.error, None);
        assert_eq!(
            result.message,
            "⚠️ sadge forcefully removed claim from tile AAB which was previously claimed by vrej."
        );
        assert!(engine.state().tile("AAB").unwrap().claim.is_none());
    }

    #[test]
    fn test_capture() {
        let (mut engine, clock) = engine();
        let banner = first_banner(&engine);
        engine.claim_tile(Some(&banner), &vrej(), false);
        clock.set(at("2022-01-01T00:05:00Z"));

        let result = engine.capture_tile(Some(&banner), &vrej());
        assert_eq!(result.error, None);
        assert_eq!(
            result.message,
            format!("✅ vrej captured tile {banner}. Great work monke strategist!")
        );

        let tile = engine.state().tile(&banner).unwrap();
        assert!(tile.claim.is_none());
        assert_eq!(tile.expires_at, Some(at("2022-01-02T00:05:00Z")));
    }

    #[test]
    fn test_capture_rejections() {
        let (mut engine, _) = engine();
        let result = engine.capture_tile(Some("AAB"), &vrej());
        assert_eq!(result.error, Some(ErrorKind::TileIsNotClaimed));
        assert_eq!(
            result.message,
            "❌ Tiles must be claimed before capturing. Please claim it first with \"/claim AAB\""
        );

        engine.claim_tile(Some("AAB"), &vrej(), false);
        let result = engine.capture_tile(Some("AAB"), &sadge());
        assert_eq!(result.error, Some(ErrorKind::TileIsClaimedByAnotherUser));
        assert_eq!(
            result.message,
            "❌ This tile is claimed by vrej. If you wish to capture it, override their claim with \"/claim AAB\"."
        );
        let tile = engine.state().tile("AAB").unwrap();
        assert_eq!(tile.claimed_by(), Some("discordUserA"));
        assert_eq!(tile.expires_at, None);
    }

    #[test]
    fn test_report_taken_is_unconditional() {
        let (mut engine, clock) = engine();
        engine.claim_tile(Some("ACA"), &vrej(), false);
        clock.advance(TimeDelta::minutes(3));

        let result = engine.report_taken(Some("ACA"), &sadge());
        assert_eq!(result.error, None);
        let tile = engine.state().tile("ACA").unwrap();
        assert_eq!(tile.expires_at, Some(start() + TimeDelta::minutes(3)));
        assert_eq!(tile.claimed_by(), Some("discordUserA"));
        assert!(engine.state().user("discordUserB").is_some());
    }

    #[test]
    fn test_set_expires_in() {
        let (mut engine, _) = engine();
        let result = engine.set_expires_in(Some("ACA"), &vrej(), Some("06:01"));
        assert_eq!(result.error, None);
        assert_eq!(
            engine.state().tile("ACA").unwrap().expires_at,
            Some(start() + TimeDelta::hours(6) + TimeDelta::minutes(1))
        );
    }

    #[test]
    fn test_set_expires_in_rejections() {
        let (mut engine, _) = engine();
        let missing = engine.set_expires_in(Some("ACA"), &vrej(), None);
        assert_eq!(missing.error, Some(ErrorKind::MissingParameter));

        for bad in ["six", "6", "06-01", "aa:bb", "-1:30"] {
            let result = engine.set_expires_in(Some("ACA"), &vrej(), Some(bad));
            assert_eq!(result.error, Some(ErrorKind::UnprocessableParameter), "{bad}");
            assert_eq!(
                result.message,
                "❌ Please format the time remaining as HOURS:MINUTES, for example 06:23"
            );
        }

        let overflow = engine.set_expires_in(Some("ACA"), &vrej(), Some("4294967295:0"));
        assert_eq!(overflow.error, Some(ErrorKind::UnprocessableParameter));

        assert_eq!(engine.state().tile("ACA").unwrap().expires_at, None);
        assert_eq!(engine.state().user_count(), 0);
    }

    #[test]
    fn test_sweep_is_throttled() {
        let (mut engine, clock) = engine();
        assert_eq!(engine.update(), None);

        clock.advance(TimeDelta::seconds(59));
        assert_eq!(engine.update(), None);

        clock.advance(TimeDelta::seconds(1));
        assert_eq!(engine.update(), Some(SweepSummary::default()));
        assert_eq!(engine.last_sweep_at(), clock.now());

        clock.advance(TimeDelta::seconds(30));
        assert_eq!(engine.update(), None);
    }

    #[test]
    fn test_sweep_expires_claims_and_ownership() {
        let (mut engine, clock) = engine();
        engine.claim_tile(Some("AAB"), &vrej(), false);
        engine.claim_tile(Some("ACA"), &vrej(), false);
        engine.capture_tile(Some("ACA"), &vrej());
        engine.set_expires_in(Some("AAC"), &sadge(), Some("0:45"));

        clock.advance(TimeDelta::minutes(29));
        assert_eq!(engine.update(), Some(SweepSummary::default()));

        clock.advance(TimeDelta::minutes(1));
        assert_eq!(
            engine.update(),
            Some(SweepSummary {
                claims_expired: 1,
                ownerships_expired: 0,
            })
        );
        assert!(engine.state().tile("AAB").unwrap().claim.is_none());

        clock.advance(TimeDelta::minutes(15));
        assert_eq!(
            engine.update(),
            Some(SweepSummary {
                claims_expired: 0,
                ownerships_expired: 1,
            })
        );
        assert!(engine.state().tile("AAC").unwrap().is_neutral());
        assert!(engine.state().tile("ACA").unwrap().expires_at.is_some());
        assert!(check_invariants(engine.state()).is_empty());
    }

    #[test]
    fn test_mutations_invalidate_cache() {
        let (mut engine, _) = engine();
        engine.available_tiles();
        engine.available_tiles();
        assert_eq!(engine.availability_recomputations(), 1);

        engine.claim_tile(Some("ACA"), &vrej(), false);
        engine.available_tiles();
        assert_eq!(engine.availability_recomputations(), 2);
        assert_eq!(engine.availability().claimed, vec!["ACA".to_string()]);

        let rejected = engine.capture_tile(Some("ACA"), &sadge());
        assert!(!rejected.is_ok());
        engine.available_tiles();
        assert_eq!(engine.availability_recomputations(), 2);
    }

    #[test]
    fn test_reinitialize() {
        let (mut engine, _) = engine();
        engine.claim_tile(Some("AAB"), &vrej(), false);
        engine.clock().advance(TimeDelta::minutes(90));
        engine.reinitialize().unwrap();

        assert!(engine.state().tiles().all(Tile::is_neutral));
        assert_eq!(engine.state().user_count(), 0);
        assert_eq!(engine.availability_recomputations(), 0);
        assert_eq!(engine.last_sweep_at(), engine.clock().now());
        assert_eq!(engine.last_sweep_at(), at("2022-01-01T01:30:00Z"));
    }

    #[test]
    fn test_display_name_refresh() {
        let (mut engine, _) = engine();
        engine.claim_tile(Some("AAB"), &vrej(), false);
        engine.claim_tile(Some("AAC"), &User::new("discordUserA", "vrej the great"), false);

        let result = engine.claim_tile(Some("AAB"), &sadge(), false);
        assert!(result.message.contains("claimed by vrej the great"));
    }
}
