//! Board layer for hexclaim.
//!
//! Static map data and the mutable registries the engine works on:
//! - Layout: deterministic tile names, banner and relic tagging
//! - Tiles with their claim and expiry fields
//! - Users, registered on first action
//! - Invariant checks over the whole state

mod invariants;
mod layout;
mod state;
mod tile;
mod user;

pub use invariants::{InvariantViolation, check_invariants};
pub use layout::{
    LayoutError, MAX_RADIUS, MapLayout, SECTORS, Substitution, generate_names, hex_tile_count,
};
pub use state::{State, canonical_name};
pub use tile::{Claim, Tile, TileType, round_minutes};
pub use user::{User, UserId};
