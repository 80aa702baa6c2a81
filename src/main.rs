//! Hexclaim CLI - inspect the tile registry and drive the engine from a terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Hexclaim - tile claim tracking for hex maps
#[derive(Parser, Debug)]
#[command(name = "hexclaim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine activity (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the tiles of the map
    Tiles {
        /// JSON config file (default: built-in map)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Only list tiles of this type
        #[arg(short = 't', long = "type")]
        tile_type: Option<cli::TileFilter>,
    },

    /// Check that a config file builds a valid map
    Validate {
        /// JSON config file
        #[arg(required = true)]
        config: PathBuf,
    },

    /// Read claim commands from stdin, one per line
    Console {
        /// JSON config file (default: built-in map)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Id of the acting user
        #[arg(long, default_value = "console")]
        user_id: String,

        /// Display name of the acting user
        #[arg(long, default_value = "console")]
        user_name: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let result = match args.command {
        Commands::Tiles {
            config,
            format,
            tile_type,
        } => cli::tiles::execute(config, format, tile_type),

        Commands::Validate { config } => cli::validate::execute(&config),

        Commands::Console {
            config,
            user_id,
            user_name,
        } => cli::console::execute(config, user_id, user_name),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
