//! Error types for `heft-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "weight and height must be greater than 0 (got {weight_kg} kg, {height_cm} cm)"
  )]
  InvalidInput { weight_kg: f64, height_cm: f64 },

  #[error("bmi must be a positive number (got {0})")]
  InvalidBmi(f64),

  #[error("bmi {bmi} does not match weight and height (expected {expected})")]
  InconsistentBmi { bmi: f64, expected: f64 },

  #[error("user name must not be empty")]
  EmptyUser,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
