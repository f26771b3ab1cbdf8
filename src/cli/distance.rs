//! Distance command implementation.

use super::{CliError, ModelArg};
use geoquiz::{Coordinate, DistanceModel};

/// Execute the distance command.
///
/// # Errors
///
/// Returns an error if either coordinate is out of range.
pub(crate) fn execute(from: [f64; 2], to: [f64; 2], model: ModelArg) -> Result<(), CliError> {
    println!("{}", describe(from, to, model)?);
    Ok(())
}

/// One-line report of the distance between `from` and `to`.
fn describe(from: [f64; 2], to: [f64; 2], model: ModelArg) -> Result<String, CliError> {
    let a = Coordinate::checked(from[0], from[1])?;
    let b = Coordinate::checked(to[0], to[1])?;
    let model = DistanceModel::from(model);

    let distance = model.distance(a, b);
    tracing::debug!(%a, %b, ?model, distance, "Computed distance");

    Ok(format!("{distance:.2} km ({a} -> {b}, model: {model:?})"))
}
