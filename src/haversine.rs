//! Great-circle distance and straight-line route estimates.
//!
//! `HaversineDirections` is the fallback when no routing service is
//! reachable: it ignores roads and returns no polyline, which sends the
//! planner down its linear-interpolation path.

use crate::traits::{Coordinate, Directions, DirectionsError, DirectionsProvider};

/// Average driving speed assumption for duration estimates.
const DEFAULT_SPEED_KMH: f64 = 80.0;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers.
///
/// NaN components propagate to a NaN result.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Point at `fraction` of the way from `from` to `to`, interpolating
/// latitude and longitude linearly.
pub fn interpolate(from: Coordinate, to: Coordinate, fraction: f64) -> Coordinate {
    Coordinate::new(
        from.latitude + (to.latitude - from.latitude) * fraction,
        from.longitude + (to.longitude - from.longitude) * fraction,
    )
}

/// Straight-line directions provider.
#[derive(Debug, Clone)]
pub struct HaversineDirections {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineDirections {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineDirections {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    fn km_to_hours(&self, km: f64) -> f64 {
        km / self.speed_kmh
    }
}

impl DirectionsProvider for HaversineDirections {
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, DirectionsError> {
        let km = haversine_km(origin, destination);
        Ok(Directions {
            total_distance_km: km,
            total_duration_hours: self.km_to_hours(km),
            polyline: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(haversine_km(origin, origin), 0.0);

        let vegas = Coordinate::new(36.1, -115.1);
        assert!(haversine_km(vegas, vegas) < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_one_degree_at_equator() {
        let dist = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((dist - 111.19).abs() < 0.01, "Expected ~111.19km, got {}", dist);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, actual distance ~370 km
        let dist = haversine_km(Coordinate::new(36.17, -115.14), Coordinate::new(34.05, -118.24));
        assert!(dist > 350.0 && dist < 400.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = Coordinate::new(37.7749, -122.4194);
        let b = Coordinate::new(34.0522, -118.2437);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let dist = haversine_km(Coordinate::new(f64::NAN, 0.0), Coordinate::new(0.0, 0.0));
        assert!(dist.is_nan());
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(20.0, 40.0);
        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);
        assert_eq!(interpolate(a, b, 0.5), Coordinate::new(15.0, 30.0));
    }

    #[test]
    fn test_straight_line_directions() {
        let provider = HaversineDirections::new(100.0);
        let origin = Coordinate::new(0.0, 0.0);
        let destination = Coordinate::new(0.0, 1.0);
        let directions = provider.directions(origin, destination).unwrap();

        assert!(directions.polyline.is_empty());
        assert!((directions.total_distance_km - 111.19).abs() < 0.01);
        assert!((directions.total_duration_hours - 1.1119).abs() < 0.001);
    }
}
