//! Console command implementation - line-oriented game over stdin/stdout.

use super::output::{
    format_outcome, format_status, game_over_message, CHOOSE_CITY, GAME_OVER_TITLE,
};
use super::{CliError, GameArgs};
use geoquiz::{Coordinate, RandomSource, RoundEngine};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  place              pick a new city to locate
  guess <lat> <lon>  guess the city's position in decimal degrees
  status             show score and remaining budget
  restart            start a new game
  help               show this help
  quit               leave the game";

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Place,
    Guess(Coordinate),
    Status,
    Restart,
    Help,
    Quit,
}

/// Parse one input line.
fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("Empty command, type 'help' for a list.".to_string());
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "place" | "p" => Command::Place,
        "guess" | "g" => {
            let (Some(lat), Some(lon)) = (words.next(), words.next()) else {
                return Err("Usage: guess <lat> <lon>".to_string());
            };
            let lat: f64 = lat.parse().map_err(|_| format!("Not a number: {lat}"))?;
            let lon: f64 = lon.parse().map_err(|_| format!("Not a number: {lon}"))?;
            Command::Guess(Coordinate::checked(lat, lon).map_err(|e| e.to_string())?)
        }
        "status" | "s" => Command::Status,
        "restart" | "r" => Command::Restart,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command {other:?}, type 'help' for a list.")),
    };

    if words.next().is_some() {
        return Err(format!("Too many arguments for {verb:?}"));
    }
    Ok(command)
}

/// Execute the console command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or stdin/stdout fail.
pub(crate) fn execute(args: &GameArgs) -> Result<(), CliError> {
    let catalog = args.load_catalog()?;
    let config = args.config()?;
    let seed = args.seed();
    tracing::info!(seed, cities = catalog.len(), "Starting console game");

    let engine = RoundEngine::seeded(catalog, seed, config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(engine, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Drive a game from `input` until `quit` or end of input.
fn run_session<R, I, O>(mut engine: RoundEngine<R>, input: I, mut out: O) -> io::Result<()>
where
    R: RandomSource,
    I: BufRead,
    O: Write,
{
    writeln!(out, "geoquiz - find the city on the map. Type 'help' for commands.")?;
    writeln!(out, "Cities in play: {}", engine.catalog().len())?;
    writeln!(out, "{}", format_status(engine.state()))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match command {
            Command::Place => {
                let state = engine.pick_target();
                if let Some(city) = state.target_city() {
                    writeln!(out, "Select the location of {}", city.name)?;
                }
            }
            Command::Guess(guess) => match engine.submit_guess(guess) {
                Ok(state) => {
                    if let Some(text) = format_outcome(state) {
                        writeln!(out, "{text}")?;
                    }
                    writeln!(out, "{}", format_status(state))?;
                    if state.is_game_over() {
                        writeln!(out, "{GAME_OVER_TITLE}: {}", game_over_message(state.score()))?;
                        writeln!(out, "Type 'restart' to play again.")?;
                    }
                }
                Err(_) => writeln!(out, "{CHOOSE_CITY}")?,
            },
            Command::Status => {
                let state = engine.state();
                writeln!(out, "{}", format_status(state))?;
                if let Some(city) = state.target_city() {
                    writeln!(out, "Current city: {}", city.name)?;
                }
            }
            Command::Restart => {
                let state = engine.restart();
                writeln!(out, "New game. {}", format_status(state))?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    writeln!(out, "Final {}", format_status(engine.state()))?;
    out.flush()
}
