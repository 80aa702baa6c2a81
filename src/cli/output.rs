//! Output formatting utilities for CLI.

use hexclaim::{Tile, TileType};
use serde::Serialize;

/// JSON-serializable tile listing entry.
#[derive(Debug, Serialize)]
pub(super) struct JsonTile<'a> {
    /// Canonical tile name.
    pub(super) name: &'a str,
    /// Tile type.
    #[serde(rename = "type")]
    pub(super) tile_type: TileType,
}

impl<'a> JsonTile<'a> {
    /// Create from a registry tile.
    pub(super) fn from_tile(tile: &'a Tile) -> Self {
        Self {
            name: &tile.name,
            tile_type: tile.tile_type,
        }
    }
}

/// Format tiles as human-readable text, one per line, with a count footer.
pub(super) fn format_text<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> String {
    let mut output = String::new();
    let mut count = 0usize;
    for tile in tiles {
        output.push_str(&tile.name);
        output.push_str(", ");
        output.push_str(tile.tile_type.as_str());
        output.push('\n');
        count += 1;
    }
    output.push_str(&format!("{count} tiles\n"));
    output
}
