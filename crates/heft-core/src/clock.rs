//! Date source used by stores to stamp new measurements.

use std::sync::Mutex;

use chrono::{Local, NaiveDate};

/// Supplies "today" in the user's local calendar.
pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// A clock that returns a settable date. Useful for tests that need
/// measurements spread across several days.
#[derive(Debug)]
pub struct FixedClock {
  date: Mutex<NaiveDate>,
}

impl FixedClock {
  pub fn new(date: NaiveDate) -> Self { Self { date: Mutex::new(date) } }

  pub fn set(&self, date: NaiveDate) {
    *self.date.lock().unwrap_or_else(|e| e.into_inner()) = date;
  }
}

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate {
    *self.date.lock().unwrap_or_else(|e| e.into_inner())
  }
}
