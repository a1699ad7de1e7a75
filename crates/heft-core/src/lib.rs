//! Core types and trait definitions for heft, a personal BMI tracker.
//!
//! This crate is deliberately free of database and UI dependencies. It holds
//! the BMI engine, the measurement types, the [`store::MeasurementStore`]
//! abstraction, and the thin services layered on top of it.

pub mod bmi;
pub mod clock;
pub mod directory;
pub mod error;
pub mod measurement;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod test_helpers;
