//! Property-based tests for distance and round mechanics.
//!
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;

use geoquiz::game::check_invariants;
use geoquiz::{distance, Catalog, Coordinate, DistanceModel, GameConfig, Phase, RoundEngine};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

fn model() -> impl Strategy<Value = DistanceModel> {
    prop_oneof![
        Just(DistanceModel::Legacy),
        Just(DistanceModel::MeanEarthRadius)
    ]
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Pick,
    Guess(Coordinate),
    Restart,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Pick),
        6 => coordinate().prop_map(Action::Guess),
        1 => Just(Action::Restart),
    ]
}

fn builtin() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// A point is always zero distance from itself.
    #[test]
    fn prop_distance_identity(p in coordinate(), model in model()) {
        prop_assert!(model.distance(p, p).abs() < f64::EPSILON);
    }

    /// Distance does not depend on argument order.
    #[test]
    fn prop_distance_symmetric(a in coordinate(), b in coordinate(), model in model()) {
        let ab = model.distance(a, b);
        let ba = model.distance(b, a);
        prop_assert!((ab - ba).abs() < 1e-9, "{} vs {}", ab, ba);
    }

    /// Distance is finite, non-negative and bounded by the antipodal maximum.
    #[test]
    fn prop_distance_bounded(a in coordinate(), b in coordinate(), model in model()) {
        let d = model.distance(a, b);
        prop_assert!(d.is_finite(), "non-finite distance for {} {}", a, b);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= model.max_distance() + 1e-6, "{} exceeds {}", d, model.max_distance());
    }

    /// Under the mean-radius model no distance exceeds half the circumference.
    #[test]
    fn prop_mean_radius_under_half_circumference(a in coordinate(), b in coordinate()) {
        let d = DistanceModel::MeanEarthRadius.distance(a, b);
        prop_assert!(d <= 20_020.0);
    }

    /// Antipodes sit at the maximum distance without producing NaN.
    #[test]
    fn prop_antipodes_are_maximal(p in coordinate()) {
        let lon = if p.lon > 0.0 { p.lon - 180.0 } else { p.lon + 180.0 };
        let antipode = Coordinate::new(-p.lat, lon);
        let d = distance(p, antipode);
        prop_assert!(d.is_finite());
        prop_assert!((d - DistanceModel::Legacy.max_distance()).abs() < 1.0, "d = {}", d);
    }

    /// Picking a target always selects a catalog member and clears markers.
    #[test]
    fn prop_pick_selects_catalog_member(seed in any::<u64>(), picks in 1usize..20) {
        let catalog = builtin();
        let mut engine = RoundEngine::seeded(Arc::clone(&catalog), seed, GameConfig::default());
        for _ in 0..picks {
            let state = engine.pick_target();
            prop_assert!(state.markers().is_empty());
            let city = state.target_city().unwrap();
            prop_assert!(catalog.contains(city));
        }
    }

    /// A guess either scores exactly one point or costs the rounded distance.
    #[test]
    fn prop_guess_scoring(seed in any::<u64>(), guess in coordinate(), model in model()) {
        let config = GameConfig { distance_model: model, ..GameConfig::default() };
        let mut engine = RoundEngine::seeded(builtin(), seed, config);
        engine.pick_target();

        let before = engine.state().clone();
        let target = before.target_city().unwrap().clone();
        let d = model.distance(guess, target.position);

        let state = engine.submit_guess(guess).unwrap();
        if d <= config.hit_radius_km {
            prop_assert_eq!(state.score(), before.score() + 1);
            prop_assert_eq!(state.remaining_budget(), before.remaining_budget());
        } else {
            prop_assert_eq!(state.score(), before.score());
            let spent = f64::from(before.remaining_budget() - state.remaining_budget());
            if state.remaining_budget() > 0 {
                prop_assert!((spent - d).abs() <= 0.5, "spent {} for {}", spent, d);
            } else {
                prop_assert!(d + 0.5 >= f64::from(before.remaining_budget()));
            }
        }

        prop_assert_eq!(state.markers().len(), 2);
        prop_assert_eq!(state.markers()[0].coordinate, target.position);
        prop_assert_eq!(state.markers()[1].coordinate, guess);
    }

    /// Arbitrary action sequences keep every invariant.
    #[test]
    fn prop_action_sequences_keep_invariants(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..60)
    ) {
        let config = GameConfig::default();
        let mut engine = RoundEngine::seeded(builtin(), seed, config);
        let mut last_score = 0;

        for action in actions {
            match action {
                Action::Pick => {
                    engine.pick_target();
                }
                Action::Guess(guess) => {
                    let had_target = engine.state().target_city().is_some();
                    let before = engine.state().clone();
                    match engine.submit_guess(guess) {
                        Ok(_) => prop_assert!(had_target),
                        Err(_) => {
                            prop_assert!(!had_target);
                            prop_assert_eq!(engine.state(), &before);
                        }
                    }
                    prop_assert!(engine.state().score() >= last_score);
                }
                Action::Restart => {
                    let state = engine.restart();
                    prop_assert_eq!(state.score(), 0);
                    prop_assert_eq!(state.remaining_budget(), config.starting_budget_km);
                    prop_assert_eq!(state.phase(), Phase::NotStarted);
                }
            }

            let state = engine.state();
            last_score = state.score();
            prop_assert!(state.remaining_budget() <= config.starting_budget_km);
            prop_assert_eq!(state.is_game_over(), state.remaining_budget() == 0);
            let violations = check_invariants(state, &config);
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
    }
}
