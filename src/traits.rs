//! Core domain types and traits for the charging-stop planner.
//!
//! The planner only reads stations through [`ChargingStation`], so apps can
//! plan over their own catalog records without converting them first.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Live availability reported by the station catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationStatus {
    Available,
    Occupied,
    Unknown,
}

/// A charging station as seen by the planner.
pub trait ChargingStation {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn position(&self) -> Coordinate;

    fn status(&self) -> StationStatus;

    /// Connector/charger type identifiers offered by this station.
    fn charger_types(&self) -> &BTreeSet<String>;
}

/// Route geometry and totals returned by a directions provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    pub total_distance_km: f64,
    pub total_duration_hours: f64,
    pub polyline: Vec<Coordinate>,
}

/// Provides driving directions between two points.
///
/// Implementations may block on network I/O. The planner itself never calls
/// a provider; [`crate::planner::plan_trip`] fetches first and plans after.
pub trait DirectionsProvider {
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, DirectionsError>;
}

#[derive(Debug)]
pub enum DirectionsError {
    Http(reqwest::Error),
    NoRoute(String),
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(err) => write!(f, "directions request failed: {}", err),
            DirectionsError::NoRoute(reason) => write!(f, "no route found: {}", reason),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectionsError::Http(err) => Some(err),
            DirectionsError::NoRoute(_) => None,
        }
    }
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}
