//! Data layer for the CSV runner.
//!
//! Responsible for validating and parsing running-log CSV input, aggregating
//! distance statistics, shaping chart series and running the combined
//! analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod chart;
pub mod reader;

pub use runner_core as core;
