//! Test fixtures for trip-planner.
//!
//! Provides:
//! - Real central London landmarks with their coordinates
//! - In-memory providers that count calls and can be told to fail

pub mod london_locations;
pub mod providers;

pub use london_locations::*;
pub use providers::*;
