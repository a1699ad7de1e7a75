//! Measurement: the single persisted record type.
//!
//! Measurements are immutable once written. The store assigns `id` and
//! `date`; callers only ever supply a [`NewMeasurement`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  bmi::{self, is_positive},
};

/// One stored BMI measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
  /// Store-assigned, monotonically increasing row id.
  pub id:        i64,
  pub user:      String,
  /// Calendar date the measurement was recorded; no time-of-day.
  pub date:      NaiveDate,
  pub weight_kg: f64,
  pub height_cm: f64,
  /// Stored alongside weight and height rather than recomputed on read.
  pub bmi:       f64,
}

/// Largest relative difference allowed between a stored `bmi` and the value
/// recomputed from its weight and height.
pub const BMI_TOLERANCE: f64 = 1e-9;

/// Input to [`crate::store::MeasurementStore::insert`].
/// `id` and `date` are always set by the store; they are not accepted from
/// callers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
  pub user:      String,
  pub weight_kg: f64,
  pub height_cm: f64,
  pub bmi:       f64,
}

impl NewMeasurement {
  pub fn new(
    user: impl Into<String>,
    weight_kg: f64,
    height_cm: f64,
    bmi: f64,
  ) -> Self {
    Self { user: user.into(), weight_kg, height_cm, bmi }
  }

  /// Check the row invariants and normalise the user name.
  ///
  /// Stores call this before writing so an invalid row is never created. The
  /// supplied `bmi` must agree with weight and height to within
  /// [`BMI_TOLERANCE`], relative.
  pub fn validated(self) -> Result<Self> {
    if !is_positive(self.weight_kg) || !is_positive(self.height_cm) {
      return Err(Error::InvalidInput {
        weight_kg: self.weight_kg,
        height_cm: self.height_cm,
      });
    }
    if !is_positive(self.bmi) {
      return Err(Error::InvalidBmi(self.bmi));
    }
    let user = normalize_user(&self.user)?;
    let expected = bmi::compute(self.weight_kg, self.height_cm)?.bmi;
    if ((self.bmi - expected) / expected).abs() > BMI_TOLERANCE {
      return Err(Error::InconsistentBmi { bmi: self.bmi, expected });
    }
    Ok(Self { user, ..self })
  }
}

/// A single point on a user's BMI trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub date: NaiveDate,
  pub bmi:  f64,
}

/// Trim a user name, rejecting names that are empty afterwards.
pub fn normalize_user(name: &str) -> Result<String> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(Error::EmptyUser);
  }
  Ok(trimmed.to_owned())
}
