//! Benchmarks for running complete games.
//!
//! This benchmarks the simulation loop that backs the `simulate` command.

#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use geoquiz::simulation::{Guesser, SimulationConfig, run_game};
use geoquiz::{Catalog, Coordinate, GameConfig, RoundEngine, RoundState};

fn load_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap_or_else(|e| panic!("Failed to load catalog: {e}")))
}

fn bench_single_game(c: &mut Criterion) {
    let catalog = load_catalog();
    let config = SimulationConfig::default();
    let guesser = Guesser::Jitter {
        max_offset_deg: 1.0,
    };

    c.bench_function("single_game_jitter", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&catalog), guesser, black_box(&config));
            black_box(result)
        });
    });
}

fn bench_oracle_game(c: &mut Criterion) {
    // Oracle never misses, so every game runs to the round cap
    let catalog = load_catalog();
    let config = SimulationConfig {
        max_rounds: 100,
        ..SimulationConfig::default()
    };

    c.bench_function("oracle_game_100_rounds", |b| {
        b.iter(|| {
            let result = run_game(black_box(7), black_box(&catalog), Guesser::Oracle, &config);
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    let catalog = load_catalog();
    let config = SimulationConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_game(black_box(seed), &catalog, Guesser::Uniform, &config);
                black_box(result);
            }
        });
    });
}

fn bench_round(c: &mut Criterion) {
    let catalog = load_catalog();
    let mut engine = RoundEngine::seeded(catalog, 42, GameConfig::default());
    let guess = Coordinate::new(46.0, 14.5);

    c.bench_function("pick_and_guess", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine.restart();
            }
            engine.pick_target();
            let state = engine.submit_guess(black_box(guess)).map(RoundState::score);
            black_box(state)
        });
    });
}

criterion_group!(
    benches,
    bench_single_game,
    bench_oracle_game,
    bench_game_batch,
    bench_round
);
criterion_main!(benches);
