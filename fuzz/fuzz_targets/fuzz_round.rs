#![no_main]

//! Round engine fuzzer.
//!
//! Drives the engine through arbitrary sequences of picks, guesses and
//! restarts, checking after every step that:
//! 1. The budget never exceeds the starting budget
//! 2. The score only grows between restarts
//! 3. Rejected guesses leave the state untouched
//! 4. All structural invariants hold

use std::sync::Arc;

use arbitrary::Arbitrary;
use geoquiz::game::check_invariants;
use geoquiz::{Catalog, Coordinate, DistanceModel, GameConfig, RoundEngine};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Pick,
    Guess { lat: f64, lon: f64 },
    Restart,
}

#[derive(Arbitrary, Debug)]
struct RoundInput {
    seed: u64,
    starting_budget: u16,
    hit_radius: u16,
    mean_radius: bool,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: RoundInput| {
    let Ok(catalog) = Catalog::builtin() else {
        return;
    };
    let config = GameConfig {
        starting_budget_km: u32::from(input.starting_budget),
        hit_radius_km: f64::from(input.hit_radius),
        distance_model: if input.mean_radius {
            DistanceModel::MeanEarthRadius
        } else {
            DistanceModel::Legacy
        },
    };
    let mut engine = RoundEngine::seeded(Arc::new(catalog), input.seed, config);
    let mut last_score = 0;

    for action in input.actions.iter().take(256) {
        match *action {
            FuzzAction::Pick => {
                engine.pick_target();
            }
            FuzzAction::Guess { lat, lon } => {
                let Ok(guess) = Coordinate::checked(lat, lon) else {
                    continue;
                };
                let before = engine.state().clone();
                if engine.submit_guess(guess).is_err() {
                    assert!(before.target_city().is_none());
                    assert_eq!(engine.state(), &before);
                }
                assert!(engine.state().score() >= last_score);
            }
            FuzzAction::Restart => {
                engine.restart();
                assert_eq!(engine.state().score(), 0);
            }
        }

        let state = engine.state();
        last_score = state.score();
        assert!(state.remaining_budget() <= config.starting_budget_km);
        let violations = check_invariants(state, &config);
        assert!(violations.is_empty(), "{violations:?}");
    }
});
