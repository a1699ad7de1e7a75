//! SQL schema for the heft SQLite store.
//!
//! Executed at connection startup. The table and column names are those of
//! the original `bmi_data.db` file, so an existing database opens unchanged.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
-- Measurements are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS bmi_data (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    user    TEXT NOT NULL,
    date    TEXT NOT NULL,                      -- YYYY-MM-DD, store-assigned
    weight  REAL NOT NULL CHECK (weight > 0),   -- kg
    height  REAL NOT NULL CHECK (height > 0),   -- cm
    bmi     REAL NOT NULL CHECK (bmi > 0)
);

CREATE INDEX IF NOT EXISTS bmi_data_user_date_idx ON bmi_data(user, date);

PRAGMA user_version = 1;
";
