#![no_main]

//! Command sequence fuzzer.
//!
//! Drives the engine with arbitrary commands from a few users, arbitrary
//! tile names and time strings, and arbitrary clock jumps. After every step
//! the registry invariants must hold and no operation may report an
//! internal error.

use arbitrary::Arbitrary;
use chrono::{DateTime, TimeDelta, Utc};
use hexclaim::board::check_invariants;
use hexclaim::{Engine, ErrorKind, ManualClock, MapLayout, Settings, User};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzCommand {
    Claim { tile: Option<String>, user: u8, force: bool },
    Unclaim { tile: Option<String>, user: u8, force: bool },
    Capture { tile: Option<String>, user: u8 },
    Taken { tile: Option<String>, user: u8 },
    ExpiresIn { tile: Option<String>, user: u8, time: Option<String> },
    Advance { seconds: u32 },
    Update,
    Report,
}

const USERS: [(&str, &str); 3] = [("a", "vrej"), ("b", "sadge"), ("c", "monke")];

fn user(index: u8) -> User {
    let (id, name) = USERS[usize::from(index) % USERS.len()];
    User::new(id, name)
}

fuzz_target!(|commands: Vec<FuzzCommand>| {
    let start: DateTime<Utc> = DateTime::from_timestamp(1_640_995_200, 0).unwrap_or_default();
    let clock = ManualClock::new(start);
    let Ok(mut engine) = Engine::new(MapLayout::default(), Settings::default(), clock.clone())
    else {
        return;
    };

    for command in commands.into_iter().take(64) {
        let result = match command {
            FuzzCommand::Claim { tile, user: u, force } => {
                Some(engine.claim_tile(tile.as_deref(), &user(u), force))
            }
            FuzzCommand::Unclaim { tile, user: u, force } => {
                Some(engine.unclaim_tile(tile.as_deref(), &user(u), force))
            }
            FuzzCommand::Capture { tile, user: u } => {
                Some(engine.capture_tile(tile.as_deref(), &user(u)))
            }
            FuzzCommand::Taken { tile, user: u } => {
                Some(engine.report_taken(tile.as_deref(), &user(u)))
            }
            FuzzCommand::ExpiresIn { tile, user: u, time } => Some(engine.set_expires_in(
                tile.as_deref(),
                &user(u),
                time.as_deref(),
            )),
            FuzzCommand::Advance { seconds } => {
                clock.advance(TimeDelta::seconds(i64::from(seconds)));
                None
            }
            FuzzCommand::Update => {
                engine.update();
                None
            }
            FuzzCommand::Report => Some(engine.available_tiles()),
        };

        if let Some(result) = result {
            assert_ne!(result.error, Some(ErrorKind::InternalError), "{}", result.message);
        }
        let violations = check_invariants(engine.state());
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
    }
});
