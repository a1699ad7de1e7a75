//! In-memory [`MeasurementStore`] used by this crate's unit tests.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, Ordering},
};

use chrono::NaiveDate;

use crate::{
  clock::{Clock, FixedClock},
  measurement::{Measurement, NewMeasurement, TrendPoint},
  store::MeasurementStore,
};

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
  #[error(transparent)]
  Core(#[from] crate::Error),

  #[error("simulated write failure")]
  WriteFailed,
}

pub struct MemoryStore {
  rows:        Mutex<Vec<Measurement>>,
  clock:       FixedClock,
  fail_writes: AtomicBool,
}

impl Default for MemoryStore {
  fn default() -> Self {
    Self {
      rows:        Mutex::new(Vec::new()),
      clock:       FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
      ),
      fail_writes: AtomicBool::new(false),
    }
  }
}

impl MemoryStore {
  pub fn row_count(&self) -> usize { self.rows.lock().unwrap().len() }

  pub fn fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }
}

impl MeasurementStore for MemoryStore {
  type Error = MemoryError;

  async fn insert(&self, input: NewMeasurement) -> Result<Measurement, MemoryError> {
    let input = input.validated()?;
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(MemoryError::WriteFailed);
    }
    let mut rows = self.rows.lock().unwrap();
    let m = Measurement {
      id:        rows.len() as i64 + 1,
      user:      input.user,
      date:      self.clock.today(),
      weight_kg: input.weight_kg,
      height_cm: input.height_cm,
      bmi:       input.bmi,
    };
    rows.push(m.clone());
    Ok(m)
  }

  async fn history(&self, user: &str) -> Result<Vec<Measurement>, MemoryError> {
    let mut out: Vec<_> = self
      .rows
      .lock()
      .unwrap()
      .iter()
      .filter(|m| m.user == user.trim())
      .cloned()
      .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    Ok(out)
  }

  async fn trend(&self, user: &str) -> Result<Vec<TrendPoint>, MemoryError> {
    let mut rows = self.history(user).await?;
    rows.reverse();
    Ok(
      rows
        .into_iter()
        .map(|m| TrendPoint { date: m.date, bmi: m.bmi })
        .collect(),
    )
  }

  async fn distinct_users(&self) -> Result<Vec<String>, MemoryError> {
    let mut users: Vec<String> =
      self.rows.lock().unwrap().iter().map(|m| m.user.clone()).collect();
    users.sort();
    users.dedup();
    Ok(users)
  }
}
