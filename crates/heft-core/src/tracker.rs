//! [`Tracker`] runs the compute-then-record flow used by front ends.

use std::sync::Arc;

use thiserror::Error;

use crate::{
  bmi::{self, Reading},
  directory::UserDirectory,
  measurement::{Measurement, NewMeasurement, TrendPoint, normalize_user},
  store::MeasurementStore,
};

/// Error returned by [`Tracker`] operations.
#[derive(Debug, Error)]
pub enum TrackerError<E> {
  /// Rejected before reaching the store; nothing was written.
  #[error(transparent)]
  Core(#[from] crate::Error),

  #[error("store error: {0}")]
  Store(#[source] E),
}

/// Owns a store handle and ties the BMI engine to it.
pub struct Tracker<S> {
  store: Arc<S>,
}

impl<S> Clone for Tracker<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: MeasurementStore> Tracker<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// A directory view over the same store.
  pub fn directory(&self) -> UserDirectory<S> {
    UserDirectory::new(Arc::clone(&self.store))
  }

  /// Compute a reading for `user` and persist it.
  ///
  /// Invalid input is rejected before the store is touched, so a failed
  /// computation never leaves a row behind.
  pub async fn measure(
    &self,
    user: &str,
    weight_kg: f64,
    height_cm: f64,
  ) -> Result<(Reading, Measurement), TrackerError<S::Error>> {
    let user = normalize_user(user)?;
    let reading = bmi::compute(weight_kg, height_cm).inspect_err(|e| {
      tracing::warn!(%user, weight_kg, height_cm, "rejected measurement: {e}");
    })?;

    let measurement = self
      .store
      .insert(NewMeasurement::new(user, weight_kg, height_cm, reading.bmi))
      .await
      .map_err(TrackerError::Store)?;

    tracing::info!(
      id = measurement.id,
      user = %measurement.user,
      bmi = reading.bmi,
      category = %reading.category,
      "recorded measurement"
    );

    Ok((reading, measurement))
  }

  pub async fn history(&self, user: &str) -> Result<Vec<Measurement>, S::Error> {
    self.store.history(user).await
  }

  pub async fn trend(&self, user: &str) -> Result<Vec<TrendPoint>, S::Error> {
    self.store.trend(user).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{bmi::Category, test_helpers::MemoryStore};

  fn tracker() -> (Arc<MemoryStore>, Tracker<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (Arc::clone(&store), Tracker::new(store))
  }

  #[tokio::test]
  async fn measure_records_computed_reading() {
    let (store, t) = tracker();

    let (reading, m) = t.measure("alice", 70.0, 175.0).await.unwrap();
    assert_eq!(reading.category, Category::NormalWeight);
    assert_eq!(m.user, "alice");
    assert_eq!(m.weight_kg, 70.0);
    assert_eq!(m.height_cm, 175.0);
    assert_eq!(m.bmi, reading.bmi);
    assert_eq!(store.row_count(), 1);
  }

  #[tokio::test]
  async fn invalid_input_writes_nothing() {
    let (store, t) = tracker();

    let err = t.measure("alice", 0.0, 170.0).await.unwrap_err();
    assert!(matches!(
      err,
      TrackerError::Core(crate::Error::InvalidInput { .. })
    ));
    let err = t.measure("alice", 70.0, -1.0).await.unwrap_err();
    assert!(matches!(err, TrackerError::Core(_)));
    assert_eq!(store.row_count(), 0);
    assert!(t.history("alice").await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn blank_user_writes_nothing() {
    let (store, t) = tracker();
    let err = t.measure("  ", 70.0, 175.0).await.unwrap_err();
    assert!(matches!(err, TrackerError::Core(crate::Error::EmptyUser)));
    assert_eq!(store.row_count(), 0);
  }

  #[tokio::test]
  async fn store_failure_is_surfaced() {
    let (store, t) = tracker();
    store.fail_writes(true);

    let err = t.measure("alice", 70.0, 175.0).await.unwrap_err();
    assert!(matches!(err, TrackerError::Store(_)));
    assert_eq!(store.row_count(), 0);
  }

  #[tokio::test]
  async fn trend_for_unknown_user_is_empty() {
    let (_, t) = tracker();
    assert!(t.trend("NewUser").await.unwrap().is_empty());
  }
}
