//! Error type for `heft-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The measurement was rejected before anything was written.
  #[error("core error: {0}")]
  Core(#[from] heft_core::Error),

  #[error("failed to open database: {0}")]
  Open(#[source] tokio_rusqlite::Error),

  /// Persisting a measurement failed; no partial row was committed.
  #[error("failed to write measurement: {0}")]
  Write(#[source] tokio_rusqlite::Error),

  #[error("failed to read measurements: {0}")]
  Read(#[source] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
