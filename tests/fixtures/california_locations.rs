//! Real California locations along the I-5 corridor.
//!
//! Coordinates are approximate town/charging-plaza positions taken from
//! OpenStreetMap. The polyline is deliberately coarse (one vertex per town).

use charge_planner::polyline::Polyline;
use charge_planner::station::Station;
use charge_planner::traits::{Coordinate, StationStatus};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub const SAN_FRANCISCO: Location = Location::new("San Francisco", 37.7749, -122.4194);
pub const LOS_ANGELES: Location = Location::new("Los Angeles", 34.0522, -118.2437);

/// Driving distance SF -> LA via I-5, in km.
pub const SF_TO_LA_KM: f64 = 615.0;

// ============================================================================
// I-5 corridor route vertices (north to south)
// ============================================================================

pub const I5_ROUTE: &[Location] = &[
    SAN_FRANCISCO,
    Location::new("Tracy", 37.7397, -121.4252),
    Location::new("Santa Nella", 37.0983, -121.0166),
    Location::new("Panoche Junction", 36.8588, -120.4560),
    Location::new("Coalinga", 36.2547, -120.2382),
    Location::new("Kettleman City", 36.0083, -119.9618),
    Location::new("Lost Hills", 35.6163, -119.6943),
    Location::new("Buttonwillow", 35.4005, -119.4696),
    Location::new("Lebec", 34.8416, -118.8648),
    Location::new("Castaic", 34.4889, -118.6228),
    LOS_ANGELES,
];

// ============================================================================
// Fast-charging sites
// ============================================================================

pub const CHARGING_SITES: &[Location] = &[
    Location::new("Tracy Supercharger", 37.7430, -121.4340),
    Location::new("Santa Nella Plaza", 37.0991, -121.0150),
    Location::new("Firebaugh Travel Center", 36.8630, -120.4530),
    Location::new("Harris Ranch", 36.2539, -120.2400),
    Location::new("Kettleman City Plaza", 36.0073, -119.9608),
    Location::new("Lost Hills Travel Center", 35.6155, -119.6930),
    Location::new("Buttonwillow Rest Area", 35.4010, -119.4710),
    Location::new("Bakersfield Rosedale", 35.3733, -119.0187),
    Location::new("Lebec Outlets", 34.8425, -118.8660),
    Location::new("Castaic Lake", 34.4900, -118.6200),
];

/// Sites that exist but are currently busy.
pub const BUSY_SITES: &[Location] = &[
    Location::new("Patterson Hub", 37.4716, -121.1297),
    Location::new("Wasco Depot", 35.5941, -119.3409),
];

pub fn i5_polyline() -> Polyline {
    Polyline::new(I5_ROUTE.iter().map(Location::coordinate).collect())
}

/// Catalog of available and busy stations, CCS on every site, CHAdeMO on
/// every other available one.
pub fn corridor_stations() -> Vec<Station> {
    let available = CHARGING_SITES.iter().enumerate().map(|(i, site)| {
        let station =
            Station::new(format!("site-{}", i), site.name, site.lat, site.lng).with_charger("CCS");
        if i % 2 == 0 {
            station.with_charger("CHAdeMO")
        } else {
            station
        }
    });

    let busy = BUSY_SITES.iter().enumerate().map(|(i, site)| {
        Station::new(format!("busy-{}", i), site.name, site.lat, site.lng)
            .with_charger("CCS")
            .with_status(StationStatus::Occupied)
    });

    available.chain(busy).collect()
}
