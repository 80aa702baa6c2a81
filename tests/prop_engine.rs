//! Property-based tests for the claim engine.
//!
//! Random command sequences from a handful of users, interleaved with clock
//! jumps and sweeps, must never break the registry invariants or the
//! availability partitions.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use proptest::prelude::*;

use hexclaim::board::check_invariants;
use hexclaim::{Engine, ErrorKind, ManualClock, MapLayout, Settings, TileType, User};

/// Tiles the generated commands target: blanks, banners, relics and one
/// name that does not exist.
const TILES: [&str; 8] = ["AAB", "ACA", "AAC", "aae", "ADA", "MRX", "FAH", "ZZZ"];

#[derive(Debug, Clone)]
enum Op {
    Claim { tile: usize, user: usize, force: bool },
    Unclaim { tile: usize, user: usize, force: bool },
    Capture { tile: usize, user: usize },
    Taken { tile: usize, user: usize },
    ExpiresIn { tile: usize, user: usize, hours: u8, minutes: u8 },
    Advance { minutes: u16 },
    Update,
    Report,
}

fn op() -> impl Strategy<Value = Op> {
    let tile = 0..TILES.len();
    let user = 0..3usize;
    prop_oneof![
        (tile.clone(), user.clone(), any::<bool>())
            .prop_map(|(tile, user, force)| Op::Claim { tile, user, force }),
        (tile.clone(), user.clone(), any::<bool>())
            .prop_map(|(tile, user, force)| Op::Unclaim { tile, user, force }),
        (tile.clone(), user.clone()).prop_map(|(tile, user)| Op::Capture { tile, user }),
        (tile.clone(), user.clone()).prop_map(|(tile, user)| Op::Taken { tile, user }),
        (tile, user, 0u8..30, 0u8..90).prop_map(|(tile, user, hours, minutes)| Op::ExpiresIn {
            tile,
            user,
            hours,
            minutes
        }),
        (0u16..2000).prop_map(|minutes| Op::Advance { minutes }),
        Just(Op::Update),
        Just(Op::Report),
    ]
}

fn start() -> DateTime<Utc> {
    "2022-01-01T00:00:00Z".parse().unwrap()
}

fn users() -> [User; 3] {
    [
        User::new("a", "vrej"),
        User::new("b", "sadge"),
        User::new("c", "monke"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Invariants hold and the partitions stay disjoint after every step.
    #[test]
    fn prop_partitions_disjoint(ops in prop::collection::vec(op(), 1..60)) {
        let clock = ManualClock::new(start());
        let mut engine = Engine::new(MapLayout::default(), Settings::default(), clock.clone()).unwrap();
        let users = users();

        for op in ops {
            match op {
                Op::Claim { tile, user, force } => {
                    engine.claim_tile(Some(TILES[tile]), &users[user], force);
                }
                Op::Unclaim { tile, user, force } => {
                    engine.unclaim_tile(Some(TILES[tile]), &users[user], force);
                }
                Op::Capture { tile, user } => {
                    engine.capture_tile(Some(TILES[tile]), &users[user]);
                }
                Op::Taken { tile, user } => {
                    engine.report_taken(Some(TILES[tile]), &users[user]);
                }
                Op::ExpiresIn { tile, user, hours, minutes } => {
                    let time = format!("{hours:02}:{minutes:02}");
                    engine.set_expires_in(Some(TILES[tile]), &users[user], Some(&time));
                }
                Op::Advance { minutes } => clock.advance(TimeDelta::minutes(i64::from(minutes))),
                Op::Update => {
                    engine.update();
                }
                Op::Report => {
                    prop_assert!(engine.available_tiles().is_ok());
                }
            }

            let violations = check_invariants(engine.state());
            prop_assert!(violations.is_empty(), "{:?}", violations);

            let availability = engine.availability().clone();
            let claimed: HashSet<&String> = availability.claimed.iter().collect();
            let available: HashSet<&String> = availability.available.iter().collect();
            let expiring: HashSet<&String> = availability.expiring.iter().collect();
            prop_assert!(claimed.is_disjoint(&available));
            prop_assert!(claimed.is_disjoint(&expiring));
            prop_assert!(available.is_disjoint(&expiring));
            prop_assert!(availability.expiring.len() <= 10);

            for name in available.iter().chain(expiring.iter()) {
                let tile = engine.state().tile(name).unwrap();
                prop_assert!(tile.tile_type != TileType::Blank);
            }

            let tracked = engine.state().tiles().filter(|t| t.tile_type.is_tracked());
            for tile in tracked {
                let in_some = claimed.contains(&tile.name)
                    || available.contains(&tile.name)
                    || tile.expires_at.is_some();
                prop_assert!(in_some, "{} is in no partition", tile.name);
            }
        }
    }

    /// A rejected operation never changes the tile it targeted.
    #[test]
    fn prop_rejections_leave_state_untouched(
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let clock = ManualClock::new(start());
        let mut engine = Engine::new(MapLayout::default(), Settings::default(), clock.clone()).unwrap();
        let users = users();

        for op in ops {
            let before = engine.state().clone();
            let recomputations = engine.availability_recomputations();
            let result = match op {
                Op::Claim { tile, user, force } => {
                    engine.claim_tile(Some(TILES[tile]), &users[user], force)
                }
                Op::Unclaim { tile, user, force } => {
                    engine.unclaim_tile(Some(TILES[tile]), &users[user], force)
                }
                Op::Capture { tile, user } => engine.capture_tile(Some(TILES[tile]), &users[user]),
                Op::Advance { minutes } => {
                    clock.advance(TimeDelta::minutes(i64::from(minutes)));
                    continue;
                }
                _ => continue,
            };

            if let Some(kind) = result.error {
                prop_assert!(kind != ErrorKind::InternalError);
                for name in before.tile_names() {
                    prop_assert_eq!(before.tile(name), engine.state().tile(name));
                }
                prop_assert_eq!(before.user_count(), engine.state().user_count());

                engine.available_tiles();
                engine.available_tiles();
                prop_assert!(engine.availability_recomputations() <= recomputations + 1);
            }
        }
    }
}
