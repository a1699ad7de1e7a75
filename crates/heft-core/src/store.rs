//! The `MeasurementStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `heft-store-sqlite`).
//! Higher layers (`heft-cli`, the [`Tracker`](crate::tracker::Tracker)) depend
//! on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::measurement::{Measurement, NewMeasurement, TrendPoint};

/// Abstraction over a heft measurement store backend.
///
/// The store is append-only: there is no update or delete. The set of users is
/// never stored on its own; it is whatever distinct names appear in the rows.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait MeasurementStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new measurement and return it with its `id` and `date` filled
  /// in. The write is atomic: either the whole row is committed or nothing is.
  fn insert(
    &self,
    input: NewMeasurement,
  ) -> impl Future<Output = Result<Measurement, Self::Error>> + Send + '_;

  /// All measurements for `user`, most recent date first. An unknown user
  /// yields an empty list.
  fn history<'a>(
    &'a self,
    user: &'a str,
  ) -> impl Future<Output = Result<Vec<Measurement>, Self::Error>> + Send + 'a;

  /// `(date, bmi)` pairs for `user`, oldest date first. An unknown user
  /// yields an empty list, which callers treat as "nothing to plot".
  fn trend<'a>(
    &'a self,
    user: &'a str,
  ) -> impl Future<Output = Result<Vec<TrendPoint>, Self::Error>> + Send + 'a;

  /// Every user name that has at least one measurement.
  fn distinct_users(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
