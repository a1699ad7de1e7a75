//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 calendar dates (`YYYY-MM-DD`).

use chrono::NaiveDate;
use heft_core::measurement::{Measurement, TrendPoint};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `bmi_data` row exactly as read from SQLite, before date decoding.
pub struct RawMeasurement {
  pub id:     i64,
  pub user:   String,
  pub date:   String,
  pub weight: f64,
  pub height: f64,
  pub bmi:    f64,
}

impl RawMeasurement {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:     row.get(0)?,
      user:   row.get(1)?,
      date:   row.get(2)?,
      weight: row.get(3)?,
      height: row.get(4)?,
      bmi:    row.get(5)?,
    })
  }

  pub fn into_measurement(self) -> Result<Measurement> {
    Ok(Measurement {
      id:        self.id,
      user:      self.user,
      date:      decode_date(&self.date)?,
      weight_kg: self.weight,
      height_cm: self.height,
      bmi:       self.bmi,
    })
  }
}

/// A `(date, bmi)` pair as read from SQLite.
pub struct RawTrendPoint {
  pub date: String,
  pub bmi:  f64,
}

impl RawTrendPoint {
  pub fn into_point(self) -> Result<TrendPoint> {
    Ok(TrendPoint { date: decode_date(&self.date)?, bmi: self.bmi })
  }
}
