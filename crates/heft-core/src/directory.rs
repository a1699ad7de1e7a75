//! User directory: the set of known users, derived from stored measurements.
//!
//! There is no user table. A user exists exactly when at least one
//! measurement names them, so the directory is recomputed from the store on
//! every call and never cached.

use std::sync::Arc;

use crate::store::MeasurementStore;

/// Read-only view over the distinct user names in a [`MeasurementStore`].
pub struct UserDirectory<S> {
  store: Arc<S>,
}

impl<S> Clone for UserDirectory<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: MeasurementStore> UserDirectory<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All users with at least one measurement, as currently committed.
  pub async fn list(&self) -> Result<Vec<String>, S::Error> {
    self.store.distinct_users().await
  }

  /// Re-read the directory and choose the user to preselect.
  ///
  /// See [`pick_default`] for the selection rule.
  pub async fn select_default(
    &self,
    current: Option<&str>,
  ) -> Result<Option<String>, S::Error> {
    let users = self.list().await?;
    Ok(pick_default(&users, current))
  }
}

/// Choose which user should be selected.
///
/// A non-empty `current` selection is kept even when it has no measurements
/// yet; that is the only place a freshly created user lives until their first
/// reading is saved. Otherwise the first listed user is chosen. `None` means
/// the directory is empty and the caller must ask for a new name.
pub fn pick_default(users: &[String], current: Option<&str>) -> Option<String> {
  match current.map(str::trim) {
    Some(name) if !name.is_empty() => Some(name.to_owned()),
    _ => users.first().cloned(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{bmi, measurement::NewMeasurement, test_helpers::MemoryStore};

  fn reading(user: &str, weight_kg: f64, height_cm: f64) -> NewMeasurement {
    let r = bmi::compute(weight_kg, height_cm).unwrap();
    NewMeasurement::new(user, weight_kg, height_cm, r.bmi)
  }

  fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn pick_default_keeps_current_selection() {
    let users = names(&["alice", "bob"]);
    assert_eq!(pick_default(&users, Some("bob")).as_deref(), Some("bob"));
    // A brand-new user with no rows is still kept.
    assert_eq!(pick_default(&users, Some("carol")).as_deref(), Some("carol"));
  }

  #[test]
  fn pick_default_falls_back_to_first_user() {
    let users = names(&["alice", "bob"]);
    assert_eq!(pick_default(&users, None).as_deref(), Some("alice"));
    assert_eq!(pick_default(&users, Some("  ")).as_deref(), Some("alice"));
  }

  #[test]
  fn pick_default_empty_directory() {
    assert_eq!(pick_default(&[], None), None);
  }

  #[tokio::test]
  async fn list_reflects_latest_inserts() {
    let store = Arc::new(MemoryStore::default());
    let dir = UserDirectory::new(Arc::clone(&store));

    assert!(dir.list().await.unwrap().is_empty());
    assert_eq!(dir.select_default(None).await.unwrap(), None);

    store
      .insert(reading("bob", 80.0, 180.0))
      .await
      .unwrap();
    store
      .insert(reading("alice", 60.0, 165.0))
      .await
      .unwrap();
    store
      .insert(reading("bob", 79.0, 180.0))
      .await
      .unwrap();

    assert_eq!(dir.list().await.unwrap(), names(&["alice", "bob"]));
    assert_eq!(
      dir.select_default(None).await.unwrap().as_deref(),
      Some("alice")
    );
  }
}
