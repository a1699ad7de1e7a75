//! The BMI engine, a pure function from weight and height to a [`Reading`].
//!
//! Nothing in here touches the store or the clock.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Category ────────────────────────────────────────────────────────────────

/// The weight category a BMI value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Underweight,
  NormalWeight,
  Overweight,
  Obesity,
}

impl Category {
  /// Classify a BMI value.
  ///
  /// The thresholds are applied literally: `18.5 <= bmi < 24.9` is normal
  /// weight and `25 <= bmi < 29.9` is overweight, so values in `[24.9, 25)`
  /// match neither band and fall through to [`Category::Obesity`] along with
  /// everything `>= 29.9`.
  pub fn classify(bmi: f64) -> Self {
    if bmi < 18.5 {
      Self::Underweight
    } else if (18.5..24.9).contains(&bmi) {
      Self::NormalWeight
    } else if (25.0..29.9).contains(&bmi) {
      Self::Overweight
    } else {
      Self::Obesity
    }
  }

  /// Human-readable label shown next to a reading.
  pub fn label(self) -> &'static str {
    match self {
      Self::Underweight => "Underweight",
      Self::NormalWeight => "Normal weight",
      Self::Overweight => "Overweight",
      Self::Obesity => "Obesity",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// An unpersisted BMI result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
  pub bmi:      f64,
  pub category: Category,
}

impl Reading {
  /// `BMI: 22.86`
  pub fn bmi_text(&self) -> String { format!("BMI: {:.2}", self.bmi) }

  /// `Category: Normal weight`
  pub fn category_text(&self) -> String { format!("Category: {}", self.category) }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Returns `true` when `value` is a finite number strictly greater than zero.
pub fn is_positive(value: f64) -> bool { value.is_finite() && value > 0.0 }

/// Compute the BMI and its category for a weight in kilograms and a height in
/// centimetres.
///
/// Both inputs must be finite and strictly positive, and so must the result;
/// anything else is rejected with [`Error::InvalidInput`]. Extreme but valid
/// inputs can still underflow to zero or overflow to infinity.
pub fn compute(weight_kg: f64, height_cm: f64) -> Result<Reading> {
  if !is_positive(weight_kg) || !is_positive(height_cm) {
    return Err(Error::InvalidInput { weight_kg, height_cm });
  }

  let height_m = height_cm / 100.0;
  let bmi = weight_kg / (height_m * height_m);
  if !is_positive(bmi) {
    return Err(Error::InvalidInput { weight_kg, height_cm });
  }

  Ok(Reading { bmi, category: Category::classify(bmi) })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_close(actual: f64, expected: f64) {
    assert!(
      (actual - expected).abs() < 0.005,
      "expected ≈{expected}, got {actual}"
    );
  }

  #[test]
  fn average_adult_is_normal_weight() {
    let r = compute(70.0, 175.0).unwrap();
    assert_close(r.bmi, 22.86);
    assert_eq!(r.category, Category::NormalWeight);
  }

  #[test]
  fn light_adult_is_normal_weight() {
    let r = compute(50.0, 160.0).unwrap();
    assert_close(r.bmi, 19.53);
    assert_eq!(r.category, Category::NormalWeight);
  }

  #[test]
  fn heavy_adult_is_obese() {
    let r = compute(120.0, 170.0).unwrap();
    assert_close(r.bmi, 41.52);
    assert_eq!(r.category, Category::Obesity);
  }

  #[test]
  fn formula_matches_definition() {
    for (w, h) in [(45.0, 150.0), (82.5, 181.0), (61.2, 168.4), (0.5, 30.0)] {
      let r = compute(w, h).unwrap();
      let expected = w / ((h / 100.0) * (h / 100.0));
      assert!((r.bmi - expected).abs() < 1e-9);
      assert_eq!(r.category, Category::classify(r.bmi));
    }
  }

  #[test]
  fn zero_weight_is_rejected() {
    let err = compute(0.0, 170.0).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
  }

  #[test]
  fn non_positive_and_non_finite_inputs_are_rejected() {
    for (w, h) in [
      (70.0, 0.0),
      (-1.0, 170.0),
      (70.0, -170.0),
      (f64::NAN, 170.0),
      (70.0, f64::INFINITY),
      // Finite and positive, but the quotient underflows or overflows.
      (1e-320, 1e10),
      (1e308, 1e-3),
    ] {
      assert!(
        matches!(compute(w, h), Err(Error::InvalidInput { .. })),
        "({w}, {h}) should be rejected"
      );
    }
  }

  #[test]
  fn category_boundaries() {
    assert_eq!(Category::classify(18.49), Category::Underweight);
    assert_eq!(Category::classify(18.5), Category::NormalWeight);
    assert_eq!(Category::classify(24.89), Category::NormalWeight);
    assert_eq!(Category::classify(25.0), Category::Overweight);
    assert_eq!(Category::classify(29.89), Category::Overweight);
    assert_eq!(Category::classify(29.9), Category::Obesity);
    assert_eq!(Category::classify(41.0), Category::Obesity);
  }

  /// The literal thresholds leave `[24.9, 25)` unclassified by the normal and
  /// overweight bands, so it lands in the final `Obesity` branch. Pinned here
  /// so any change to the boundaries is a deliberate one.
  #[test]
  fn gap_between_normal_and_overweight_falls_through_to_obesity() {
    assert_eq!(Category::classify(24.9), Category::Obesity);
    assert_eq!(Category::classify(24.95), Category::Obesity);
    assert_eq!(compute(24.95, 100.0).unwrap().category, Category::Obesity);
  }

  #[test]
  fn reading_display_text() {
    let r = compute(70.0, 175.0).unwrap();
    assert_eq!(r.bmi_text(), "BMI: 22.86");
    assert_eq!(r.category_text(), "Category: Normal weight");
  }
}
