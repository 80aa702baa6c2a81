//! Interactive console: the chat commands, typed on stdin.
//!
//! Each line is one command. The sweep runs before every command, standing in
//! for the periodic timer a chat bot would use.

use super::CliError;
use hexclaim::{Clock, CommandResult, Config, Engine, ErrorKind, User};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  claim <tile> [--force]     claim a tile, or extend your own claim
  unclaim <tile> [--force]   release a claim without capturing
  capture <tile>             mark your claimed tile as captured
  taken <tile>               report a tile as taken by another team
  expires <tile> <HH:MM>     report the time left until a tile expires
  available                  show the availability report
  user <id> <name>           act as another user
  help                       show this help
  quit                       leave the console";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Claim { tile: Option<String>, force: bool },
    Unclaim { tile: Option<String>, force: bool },
    Capture { tile: Option<String> },
    Taken { tile: Option<String> },
    Expires { tile: Option<String>, time: Option<String> },
    Available,
    SwitchUser { id: String, name: String },
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let mut force = false;
    let mut args = Vec::new();
    for word in words {
        if word == "--force" || word == "-f" {
            force = true;
        } else {
            args.push(word.to_string());
        }
    }
    let mut args = args.into_iter();
    let tile = args.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "claim" => Command::Claim { tile, force },
        "unclaim" => Command::Unclaim { tile, force },
        "capture" => Command::Capture { tile },
        "taken" => Command::Taken { tile },
        "expires" => Command::Expires {
            tile,
            time: args.next(),
        },
        "available" => Command::Available,
        "user" => {
            let name = args.collect::<Vec<_>>().join(" ");
            match tile {
                Some(id) if !name.is_empty() => Command::SwitchUser { id, name },
                _ => return Err("Usage: user <id> <name>".to_string()),
            }
        }
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: {other}. Type \"help\" for a list.")),
    };
    Ok(Some(command))
}

/// Run commands from `input` until EOF or `quit`, writing replies to `output`.
fn run<C: Clock>(
    engine: &mut Engine<C>,
    mut user: User,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };

        engine.update();
        let result = match command {
            Command::Claim { tile, force } => engine.claim_tile(tile.as_deref(), &user, force),
            Command::Unclaim { tile, force } => engine.unclaim_tile(tile.as_deref(), &user, force),
            Command::Capture { tile } => engine.capture_tile(tile.as_deref(), &user),
            Command::Taken { tile } => engine.report_taken(tile.as_deref(), &user),
            Command::Expires { tile, time } => {
                engine.set_expires_in(tile.as_deref(), &user, time.as_deref())
            }
            Command::Available => engine.available_tiles(),
            Command::SwitchUser { id, name } => {
                user = User::new(id, name);
                CommandResult::ok(format!("Now acting as {}.", user.display_name))
            }
            Command::Help => CommandResult::ok(HELP),
            Command::Quit => break,
        };

        writeln!(output, "{}", result.message)?;
        if result.error == Some(ErrorKind::TileIsClaimedByAnotherUser) {
            writeln!(output, "(repeat the command with --force to override)")?;
        }
    }
    output.flush()
}

/// Execute the console command.
///
/// # Errors
///
/// Returns an error if the config is invalid or stdin/stdout fail.
pub(crate) fn execute(
    config: Option<PathBuf>,
    user_id: String,
    user_name: String,
) -> Result<(), CliError> {
    let config = Config::load_or_default(config.as_deref())?;
    let mut engine = Engine::with_system_clock(config.layout, config.settings)?;

    println!("hexclaim console - type \"help\" for commands");
    run(
        &mut engine,
        User::new(user_id, user_name),
        io::stdin().lock(),
        io::stdout().lock(),
    )?;
    Ok(())
}
