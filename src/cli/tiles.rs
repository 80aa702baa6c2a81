//! Tile listing command implementation.

use super::output::{JsonTile, format_text};
use super::{CliError, OutputFormat, TileFilter};
use hexclaim::{Config, State, TileType};
use std::path::PathBuf;

/// Execute the tiles command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or its layout is invalid.
pub(crate) fn execute(
    config: Option<PathBuf>,
    format: OutputFormat,
    filter: Option<TileFilter>,
) -> Result<(), CliError> {
    let config = Config::load_or_default(config.as_deref())?;
    let state = State::new(&config.layout)?;
    let wanted = filter.map(TileType::from);
    let tiles = state
        .tiles()
        .filter(|tile| wanted.is_none_or(|t| tile.tile_type == t));

    match format {
        OutputFormat::Text => print!("{}", format_text(tiles)),
        OutputFormat::Json => {
            let tiles: Vec<JsonTile<'_>> = tiles.map(JsonTile::from_tile).collect();
            println!("{}", serde_json::to_string_pretty(&tiles)?);
        }
    }

    Ok(())
}
