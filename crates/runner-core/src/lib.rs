//! Domain types shared by the CSV runner crates.
//!
//! Holds the validated [`models::Record`] and the metric value objects, the
//! crate-wide error type, persisted settings and display formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
