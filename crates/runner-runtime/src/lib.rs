//! Runtime layer for the CSV runner.
//!
//! Provides the asynchronous parse boundary consumed by presentation code and
//! the logging bootstrap.

pub mod bootstrap;
pub mod loader;

pub use runner_core as core;
pub use runner_data as data;
