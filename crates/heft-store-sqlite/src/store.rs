//! [`SqliteStore`], the SQLite implementation of [`MeasurementStore`].

use std::{path::Path, sync::Arc};

use heft_core::{
  clock::{Clock, SystemClock},
  measurement::{Measurement, NewMeasurement, TrendPoint},
  store::MeasurementStore,
};

use crate::{
  Error, Result,
  encode::{RawMeasurement, RawTrendPoint, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A heft measurement store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:  tokio_rusqlite::Connection,
  clock: Arc<dyn Clock>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::Open)?;
    let store = Self { conn, clock: Arc::new(SystemClock) };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened measurement store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::Open)?;
    let store = Self { conn, clock: Arc::new(SystemClock) };
    store.init_schema().await?;
    Ok(store)
  }

  /// Replace the date source used to stamp new measurements.
  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  /// Create the table and index if they are absent.
  ///
  /// Safe to call any number of times; existing rows are never touched.
  pub async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::Open)?;
    Ok(())
  }
}

// ─── MeasurementStore impl ───────────────────────────────────────────────────

impl MeasurementStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, input: NewMeasurement) -> Result<Measurement> {
    let input    = input.validated()?;
    let date     = self.clock.today();
    let date_str = encode_date(date);

    let user      = input.user.clone();
    let weight_kg = input.weight_kg;
    let height_cm = input.height_cm;
    let bmi       = input.bmi;

    let id: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO bmi_data (user, date, weight, height, bmi)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![user, date_str, weight_kg, height_cm, bmi],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await
      .map_err(Error::Write)?;

    tracing::debug!(id, user = %input.user, %date, "inserted measurement");

    Ok(Measurement {
      id,
      user: input.user,
      date,
      weight_kg,
      height_cm,
      bmi,
    })
  }

  async fn history(&self, user: &str) -> Result<Vec<Measurement>> {
    // Names are stored trimmed.
    let user = user.trim();
    let user_owned = user.to_owned();

    let raws: Vec<RawMeasurement> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, user, date, weight, height, bmi
           FROM bmi_data
           WHERE user = ?1
           ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_owned], RawMeasurement::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Read)?;

    tracing::debug!(user, rows = raws.len(), "loaded history");
    raws.into_iter().map(RawMeasurement::into_measurement).collect()
  }

  async fn trend(&self, user: &str) -> Result<Vec<TrendPoint>> {
    let user = user.trim();
    let user_owned = user.to_owned();

    let raws: Vec<RawTrendPoint> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT date, bmi
           FROM bmi_data
           WHERE user = ?1
           ORDER BY date ASC, id ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_owned], |row| {
            Ok(RawTrendPoint { date: row.get(0)?, bmi: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Read)?;

    tracing::debug!(user, points = raws.len(), "loaded trend");
    raws.into_iter().map(RawTrendPoint::into_point).collect()
  }

  async fn distinct_users(&self) -> Result<Vec<String>> {
    // Rows written by older front ends may carry an empty user; those are not
    // a selectable user.
    let users: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT user
           FROM bmi_data
           WHERE user IS NOT NULL AND trim(user) <> ''
           ORDER BY user",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Read)?;

    Ok(users)
  }
}
