//! charge-planner core
//!
//! Picks charging stops along a driving route for an electric vehicle with
//! a limited range.

pub mod traits;
pub mod budget;
pub mod planner;
pub mod osrm;
pub mod generation;
pub mod haversine;
pub mod polyline;
pub mod station;
