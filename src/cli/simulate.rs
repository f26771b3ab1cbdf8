//! Simulate command implementation.

// Rates are reported as floats
#![allow(clippy::cast_precision_loss)]

use super::output::{
    format_simulation_csv, format_simulation_text, JsonSimulationResult, SimulationStats,
};
use super::{CliError, GameArgs, GuesserArg, SimulateFormat};
use geoquiz::simulation::{run_game, Guesser, SimulationConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Options specific to the simulate command.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SimulateOptions {
    /// Number of games to run.
    pub(crate) games: u64,
    /// Guessing strategy.
    pub(crate) guesser: GuesserArg,
    /// Jitter spread in degrees.
    pub(crate) spread: f64,
    /// Round cap per game.
    pub(crate) max_rounds: u32,
    /// Parallel threads (default: CPU count).
    pub(crate) threads: Option<usize>,
    /// Output format.
    pub(crate) format: SimulateFormat,
    /// Show a progress bar.
    pub(crate) progress: bool,
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub(crate) fn execute(args: &GameArgs, options: SimulateOptions) -> Result<(), CliError> {
    let start = Instant::now();
    let report = run(args, options)?;
    let duration = start.elapsed();

    print!("{}", render(&report, options.format)?);
    if options.format == SimulateFormat::Text {
        let games_per_sec = if duration.as_secs_f64() > 0.0 {
            report.stats.games_played as f64 / duration.as_secs_f64()
        } else {
            0.0
        };
        println!();
        println!(
            "Duration: {:.2}s ({:.0} games/sec)",
            duration.as_secs_f64(),
            games_per_sec
        );
    }

    Ok(())
}

/// Aggregated outcome of a simulation batch.
#[derive(Debug)]
struct SimulationReport {
    stats: SimulationStats,
    guesser_name: String,
}

/// Play all games in parallel and aggregate their results.
fn run(args: &GameArgs, options: SimulateOptions) -> Result<SimulationReport, CliError> {
    let catalog = args.load_catalog()?;
    let config = SimulationConfig {
        game: args.config()?,
        max_rounds: options.max_rounds,
    };

    let guesser = match options.guesser {
        GuesserArg::Oracle => Guesser::Oracle,
        GuesserArg::Jitter => {
            if !options.spread.is_finite() || options.spread < 0.0 {
                return Err(CliError::new(format!(
                    "Spread must be a non-negative number, got {}",
                    options.spread
                )));
            }
            Guesser::Jitter {
                max_offset_deg: options.spread,
            }
        }
        GuesserArg::Uniform => Guesser::Uniform,
    };
    let guesser_name = match guesser {
        Guesser::Oracle => "oracle".to_string(),
        Guesser::Jitter { max_offset_deg } => format!("jitter({max_offset_deg}°)"),
        Guesser::Uniform => "uniform".to_string(),
    };

    // Set thread pool size if specified
    if let Some(num_threads) = options.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = args.seed();
    tracing::info!(base_seed, games = options.games, guesser = %guesser_name, "Starting simulation");

    // Progress bar
    let pb = if options.progress {
        let pb = ProgressBar::new(options.games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    // Each thread accumulates into its own stats, merged at the end
    let stats = (0..options.games)
        .into_par_iter()
        .fold(SimulationStats::default, |mut local_stats, i| {
            let game_seed = base_seed.wrapping_add(i);
            let result = run_game(game_seed, &catalog, guesser, &config);
            local_stats.add_result(&result);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(SimulationStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    Ok(SimulationReport {
        stats,
        guesser_name,
    })
}

/// Format a report in the requested output format.
fn render(report: &SimulationReport, format: SimulateFormat) -> Result<String, CliError> {
    let SimulationReport {
        stats,
        guesser_name,
    } = report;

    match format {
        SimulateFormat::Text => Ok(format!("\n{}", format_simulation_text(stats, guesser_name))),
        SimulateFormat::Json => {
            let json_result = JsonSimulationResult::from_stats(stats, guesser_name);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            Ok(format!("{json}\n"))
        }
        SimulateFormat::Csv => Ok(format_simulation_csv(stats, guesser_name)),
    }
}
