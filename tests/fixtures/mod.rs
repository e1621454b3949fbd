//! Test fixtures for charge-planner.
//!
//! Provides realistic test data including:
//! - Real California cities and I-5 corridor fast-charging sites
//! - A coarse San Francisco to Los Angeles route polyline

pub mod california_locations;

pub use california_locations::*;
