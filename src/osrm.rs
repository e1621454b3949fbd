//! OSRM HTTP adapter for driving directions.

use serde::Deserialize;
use tracing::warn;

use crate::traits::{Coordinate, Directions, DirectionsError, DirectionsProvider};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        // OSRM takes lng,lat pairs.
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        )
    }
}

impl DirectionsProvider for OsrmClient {
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, DirectionsError> {
        let url = self.route_url(origin, destination);

        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())
            .inspect_err(|err| warn!(url = %url, error = %err, "OSRM route request failed"))?;

        body.into_directions()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    fn into_directions(self) -> Result<Directions, DirectionsError> {
        if self.code != "Ok" {
            let reason = match self.message {
                Some(message) => format!("{}: {}", self.code, message),
                None => self.code,
            };
            return Err(DirectionsError::NoRoute(reason));
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| DirectionsError::NoRoute("response contained no routes".to_string()))?;

        let polyline = route
            .geometry
            .map(|geometry| {
                geometry
                    .coordinates
                    .into_iter()
                    .map(|[lng, lat]| Coordinate::new(lat, lng))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Directions {
            total_distance_km: route.distance / 1000.0,
            total_duration_hours: route.duration / 3600.0,
            polyline,
        })
    }
}
