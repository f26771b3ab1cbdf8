#![no_main]

//! Distance fuzzer.
//!
//! Feeds arbitrary valid coordinate pairs to both distance models and checks
//! the result is finite, non-negative, symmetric and no larger than the
//! antipodal distance. Rounding near identical or antipodal points must never
//! push the arccosine out of its domain.

use arbitrary::Arbitrary;
use geoquiz::{Coordinate, DistanceModel};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct DistanceInput {
    a: (f64, f64),
    b: (f64, f64),
    mean_radius: bool,
}

fn coordinate((lat, lon): (f64, f64)) -> Option<Coordinate> {
    Coordinate::checked(lat, lon).ok()
}

fuzz_target!(|input: DistanceInput| {
    let (Some(a), Some(b)) = (coordinate(input.a), coordinate(input.b)) else {
        return;
    };
    let model = if input.mean_radius {
        DistanceModel::MeanEarthRadius
    } else {
        DistanceModel::Legacy
    };

    let ab = model.distance(a, b);
    let ba = model.distance(b, a);

    assert!(ab.is_finite(), "non-finite distance {ab} for {a} {b}");
    assert!(ab >= 0.0, "negative distance {ab}");
    assert!(ab <= model.max_distance() + 1e-6, "{ab} exceeds maximum");
    assert!((ab - ba).abs() < 1e-9, "asymmetric: {ab} vs {ba}");
    assert!(model.distance(a, a).abs() < f64::EPSILON);
});
