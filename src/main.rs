//! geoquiz CLI - play the city-guessing quiz and run automated games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// geoquiz - find the city on the map before your distance budget runs out
#[derive(Parser, Debug)]
#[command(name = "geoquiz")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively on a terminal world map
    Play {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Log file (the TUI owns the terminal)
        #[arg(long, default_value = "geoquiz.log")]
        log_file: PathBuf,
    },

    /// Play with typed commands on stdin/stdout
    Console {
        #[command(flatten)]
        game: cli::GameArgs,
    },

    /// Print the great-circle distance between two points
    #[command(allow_negative_numbers = true)]
    Distance {
        /// Latitude of the first point
        from_lat: f64,
        /// Longitude of the first point
        from_lon: f64,
        /// Latitude of the second point
        to_lat: f64,
        /// Longitude of the second point
        to_lon: f64,

        /// Distance model
        #[arg(short, long, value_enum, default_value = "legacy")]
        model: cli::ModelArg,
    },

    /// Run many automated games in parallel and aggregate statistics
    Simulate {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Guessing strategy
        #[arg(long, value_enum, default_value = "jitter")]
        guesser: cli::GuesserArg,

        /// Largest jitter offset in degrees
        #[arg(long, default_value = "1.0")]
        spread: f64,

        /// Rounds after which a game stops (default: 1000)
        #[arg(long, default_value = "1000")]
        max_rounds: u32,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Validate a catalog file and list its cities
    Catalog {
        /// Catalog JSON file (default: bundled catalog)
        path: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::CatalogFormat,
    },
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default level. With a log file, output goes
/// there without ANSI colours; otherwise to stderr.
fn init_logging(log_file: Option<&Path>) -> Result<(), cli::CliError> {
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    cli::CliError::new(format!("Failed to open log file {}: {e}", path.display()))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), cli::CliError> {
    match args.command {
        Commands::Play { game, log_file } => {
            init_logging(Some(&log_file))?;
            cli::play::execute(&game)
        }

        Commands::Console { game } => {
            init_logging(None)?;
            cli::console::execute(&game)
        }

        Commands::Distance {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
            model,
        } => {
            init_logging(None)?;
            cli::distance::execute([from_lat, from_lon], [to_lat, to_lon], model)
        }

        Commands::Simulate {
            game,
            games,
            guesser,
            spread,
            max_rounds,
            threads,
            format,
            progress,
        } => {
            init_logging(None)?;
            let options = cli::simulate::SimulateOptions {
                games,
                guesser,
                spread,
                max_rounds,
                threads,
                format,
                progress,
            };
            cli::simulate::execute(&game, options)
        }

        Commands::Catalog { path, format } => {
            init_logging(None)?;
            cli::catalog::execute(path.as_deref(), format)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
