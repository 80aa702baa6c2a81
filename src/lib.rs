// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Hexclaim: claim, capture and expiry tracking for hexagonal map tiles.
//!
//! Players coordinate over chat: someone claims a tile before attacking it,
//! captures it once taken, and the tile stays owned until its expiry. This
//! crate is the state machine behind those commands, independent of any
//! chat platform.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Chat adapter / console (binary)   │
//! ├─────────────────────────────────────┤
//! │  Engine: claim, capture, sweep      │
//! │  Report: cached availability        │
//! ├─────────────────────────────────────┤
//! │  Board: tiles, users, layout        │
//! ├─────────────────────────────────────┤
//! │  Clock (system or manual)           │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use hexclaim::{Engine, ManualClock, MapLayout, Settings, User};
//!
//! let clock = ManualClock::new("2022-01-01T00:00:00Z".parse().unwrap());
//! let mut engine = Engine::new(MapLayout::default(), Settings::default(), clock).unwrap();
//!
//! let vrej = User::new("discordUserA", "vrej");
//! let result = engine.claim_tile(Some("AAB"), &vrej, false);
//! assert_eq!(result.message, "✅ vrej claimed tile AAB for 30 min.");
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod settings;

pub use error::{CommandResult, ErrorKind, Rejection};

// Re-export the types a caller needs to drive the engine
pub use board::{LayoutError, MapLayout, State, Tile, TileType, User, UserId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigError};
pub use engine::{Engine, ExpiresIn, SweepSummary};
pub use report::Availability;
pub use settings::Settings;
