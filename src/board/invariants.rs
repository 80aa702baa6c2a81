//! Registry invariants - sanity checks that detect bugs.
//!
//! The engine never produces a state that fails these. If one triggers, an
//! operation wrote a partial or inconsistent update.

use std::collections::HashSet;

use crate::board::State;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all registry invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &State) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();

    for name in &state.tile_names {
        if !seen.insert(name.as_str()) {
            violations.push(InvariantViolation {
                message: format!("Tile {name} is listed more than once"),
            });
        }
        if !state.tiles.contains_key(name) {
            violations.push(InvariantViolation {
                message: format!("Tile {name} is listed but has no record"),
            });
        }
    }

    for (key, tile) in &state.tiles {
        if *key != tile.name {
            violations.push(InvariantViolation {
                message: format!("Tile stored under {key} is named {}", tile.name),
            });
        }
        if !seen.contains(key.as_str()) {
            violations.push(InvariantViolation {
                message: format!("Tile {key} has a record but is not listed"),
            });
        }
        if let Some(claimant) = tile.claimed_by()
            && !state.users.contains_key(claimant)
        {
            violations.push(InvariantViolation {
                message: format!("Tile {key} is claimed by unregistered user {claimant}"),
            });
        }
    }

    for (id, user) in &state.users {
        if *id != user.id {
            violations.push(InvariantViolation {
                message: format!("User stored under {id} has id {}", user.id),
            });
        }
    }

    violations
}
