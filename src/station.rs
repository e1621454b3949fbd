//! Charging station record plus the reachability and selection steps.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::haversine::{EARTH_RADIUS_KM, haversine_km};
use crate::traits::{ChargingStation, Coordinate, StationStatus};

/// Station record as stored by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub position: Coordinate,
    pub status: StationStatus,
    #[serde(default)]
    pub charger_types: BTreeSet<String>,
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Coordinate::new(latitude, longitude),
            status: StationStatus::Available,
            charger_types: BTreeSet::new(),
        }
    }

    pub fn with_status(mut self, status: StationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_charger(mut self, charger_type: impl Into<String>) -> Self {
        self.charger_types.insert(charger_type.into());
        self
    }
}

impl ChargingStation for Station {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Coordinate {
        self.position
    }

    fn status(&self) -> StationStatus {
        self.status
    }

    fn charger_types(&self) -> &BTreeSet<String> {
        &self.charger_types
    }
}

/// Stations within `max_range_km` of `current`, in input order.
///
/// Does not look at availability; callers filter that first.
pub fn reachable_from<'a, S, I>(current: Coordinate, stations: I, max_range_km: f64) -> Vec<&'a S>
where
    S: ChargingStation + 'a,
    I: IntoIterator<Item = &'a S>,
{
    stations
        .into_iter()
        .filter(|station| haversine_km(current, station.position()) <= max_range_km)
        .collect()
}

/// Candidate closest to `target`. Ties go to the earliest candidate.
pub fn select_nearest<'a, S>(target: Coordinate, candidates: &[&'a S]) -> Option<&'a S>
where
    S: ChargingStation,
{
    let mut best: Option<(&'a S, f64)> = None;

    for &candidate in candidates {
        let distance = haversine_km(target, candidate.position());
        if distance.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(station, _)| station)
}

/// Display position for a station marker, nudged so that co-located
/// stations do not render on top of each other.
///
/// The offset is derived only from the station id, so a given station
/// always lands at the same spot. It is at most `max_offset_km` away.
pub fn marker_position<S: ChargingStation>(station: &S, max_offset_km: f64) -> Coordinate {
    let digest = blake3::hash(station.id().as_bytes());
    let bytes = digest.as_bytes();

    let bearing = unit_fraction(&bytes[0..8]) * TAU;
    let radius_km = unit_fraction(&bytes[8..16]) * max_offset_km;

    let origin = station.position();
    let km_per_degree = EARTH_RADIUS_KM.to_radians();
    let lat_scale = origin.latitude.to_radians().cos().max(1e-6);

    let latitude = origin.latitude + radius_km * bearing.cos() / km_per_degree;
    let longitude = origin.longitude + radius_km * bearing.sin() / (km_per_degree * lat_scale);

    Coordinate::new(latitude.clamp(-90.0, 90.0), wrap_longitude(longitude))
}

/// Folds a longitude back into [-180, 180] after crossing the antimeridian.
fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

fn unit_fraction(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf) as f64 / u64::MAX as f64
}
