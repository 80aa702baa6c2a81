//! Config validation command implementation.

use super::CliError;
use hexclaim::{Config, State, TileType};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or its layout is invalid.
pub(crate) fn execute(config: &Path) -> Result<(), CliError> {
    println!("Validating: {}", config.display());
    println!();

    let loaded = Config::load(config);
    print_check("Config parses", loaded.is_ok());
    let loaded = loaded?;

    let state = State::new(&loaded.layout);
    print_check("Map layout builds", state.is_ok());
    let state = state?;

    let count = |t: TileType| state.tiles().filter(|tile| tile.tile_type == t).count();

    println!();
    println!("Summary:");
    println!("  Radius:        {}", loaded.layout.radius);
    println!("  Tiles:         {}", state.tile_count());
    println!("  Banners:       {}", count(TileType::Banner));
    println!("  Relics:        {}", count(TileType::Relic));
    println!(
        "  Claim length:  {} min",
        loaded.settings.claim_duration_minutes
    );
    println!(
        "  Capture hold:  {} min",
        loaded.settings.capture_duration_minutes
    );

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
