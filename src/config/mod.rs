//! Configuration module for tandem
//!
//! This module handles the sync engine's tunable settings, including
//! serialization/deserialization to/from JSON and persistent storage to
//! platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
