//! Charging-stop planner: greedy, non-backtracking selection of stations
//! along a route so the vehicle never runs past its usable range.

use std::collections::BTreeSet;
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::budget::{INTER_STOP_FRACTION, NO_STOP_FRACTION, RangeBudget};
use crate::haversine::{haversine_km, interpolate};
use crate::polyline::{Polyline, RouteWalker};
use crate::station::{reachable_from, select_nearest};
use crate::traits::{
    ChargingStation, Coordinate, Directions, DirectionsError, DirectionsProvider, StationStatus,
};

/// Fraction of vehicle range a single leg may cover between stops.
pub const REACH_FRACTION: f64 = 0.8;

/// Upper bound on stops a single plan may request.
pub const MAX_PLANNED_STOPS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    /// Trips up to `range * no_stop_fraction` need no charging.
    pub no_stop_fraction: f64,
    /// Spacing between intended stops, as a fraction of range.
    pub inter_stop_fraction: f64,
    /// Maximum leg length from the current position, as a fraction of range.
    pub reach_fraction: f64,
    /// When set, a station must also lie within this distance of the
    /// intended stop point to be chosen.
    pub max_target_deviation_km: Option<f64>,
    /// When non-empty, only stations offering one of these charger types.
    pub required_charger_types: BTreeSet<String>,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            no_stop_fraction: NO_STOP_FRACTION,
            inter_stop_fraction: INTER_STOP_FRACTION,
            reach_fraction: REACH_FRACTION,
            max_target_deviation_km: None,
            required_charger_types: BTreeSet::new(),
        }
    }
}

/// A driving route as delivered by the directions provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInput {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub total_distance_km: f64,
    /// May be empty, in which case stop targets are interpolated on the
    /// straight line from origin to destination.
    #[serde(default)]
    pub polyline: Polyline,
}

impl RouteInput {
    pub fn new(origin: Coordinate, destination: Coordinate, total_distance_km: f64) -> Self {
        Self {
            origin,
            destination,
            total_distance_km,
            polyline: Polyline::default(),
        }
    }

    pub fn with_polyline(mut self, polyline: Polyline) -> Self {
        self.polyline = polyline;
        self
    }

    pub fn from_directions(
        origin: Coordinate,
        destination: Coordinate,
        directions: Directions,
    ) -> Self {
        Self {
            origin,
            destination,
            total_distance_km: directions.total_distance_km,
            polyline: Polyline::new(directions.polyline),
        }
    }
}

/// Non-fatal conditions recorded while planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanWarning {
    NoAvailableStations,
    /// No reachable station for the given 1-based stop number.
    CoverageGap { stop: usize },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::NoAvailableStations => {
                write!(f, "no available charging stations for route planning")
            }
            PlanWarning::CoverageGap { stop } => write!(f, "coverage gap near stop {}", stop),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult<S> {
    /// Ordered from origin side to destination side.
    pub stops: Vec<S>,
    pub warnings: Vec<PlanWarning>,
}

impl<S> PlanResult<S> {
    fn empty() -> Self {
        Self {
            stops: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// True when every requested stop was filled.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

impl<S: ChargingStation> PlanResult<S> {
    /// Straight-line length of each leg: origin to the first stop, between
    /// stops, and the last stop to the destination.
    pub fn leg_distances_km(&self, origin: Coordinate, destination: Coordinate) -> Vec<f64> {
        let waypoints: Vec<Coordinate> = std::iter::once(origin)
            .chain(self.stops.iter().map(|stop| stop.position()))
            .chain(std::iter::once(destination))
            .collect();

        waypoints
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .collect()
    }
}

#[derive(Debug)]
pub enum PlanError {
    InvalidRange(f64),
    InvalidDistance(f64),
    InvalidCoordinate(Coordinate),
    InvalidOption { name: &'static str, value: f64 },
    TooManyStops(usize),
    Directions(DirectionsError),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidRange(range) => {
                write!(f, "vehicle range must be a positive finite number, got {}", range)
            }
            PlanError::InvalidDistance(distance) => {
                write!(f, "route distance must be a non-negative finite number, got {}", distance)
            }
            PlanError::InvalidCoordinate(coord) => write!(
                f,
                "invalid coordinate ({}, {})",
                coord.latitude, coord.longitude
            ),
            PlanError::InvalidOption { name, value } => {
                write!(f, "planner option {} is out of range: {}", name, value)
            }
            PlanError::TooManyStops(count) => write!(
                f,
                "trip would need {} stops, more than the limit of {}",
                count, MAX_PLANNED_STOPS
            ),
            PlanError::Directions(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Directions(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DirectionsError> for PlanError {
    fn from(err: DirectionsError) -> Self {
        PlanError::Directions(err)
    }
}

/// One independent planning job for [`plan_batch`].
#[derive(Debug, Clone)]
pub struct PlanRequest<S> {
    pub route: RouteInput,
    pub stations: Vec<S>,
    pub vehicle_range_km: f64,
}

/// Route plus the stops planned along it.
#[derive(Debug, Clone)]
pub struct TripPlan<S> {
    pub route: RouteInput,
    pub total_duration_hours: f64,
    pub result: PlanResult<S>,
}

/// Plans charging stops with the default margins.
pub fn plan<S>(
    route: &RouteInput,
    stations: &[S],
    vehicle_range_km: f64,
) -> Result<PlanResult<S>, PlanError>
where
    S: ChargingStation + Clone,
{
    plan_with_options(route, stations, vehicle_range_km, &PlannerOptions::default())
}

pub fn plan_with_options<S>(
    route: &RouteInput,
    stations: &[S],
    vehicle_range_km: f64,
    options: &PlannerOptions,
) -> Result<PlanResult<S>, PlanError>
where
    S: ChargingStation + Clone,
{
    validate(route, vehicle_range_km)?;
    validate_options(options)?;

    let budget = RangeBudget::with_fractions(
        route.total_distance_km,
        vehicle_range_km,
        options.no_stop_fraction,
        options.inter_stop_fraction,
    );
    debug!(
        total_distance_km = route.total_distance_km,
        vehicle_range_km,
        stops_needed = budget.stops_needed,
        "computed range budget"
    );

    if budget.stops_needed == 0 {
        return Ok(PlanResult::empty());
    }
    if budget.stops_needed > MAX_PLANNED_STOPS {
        return Err(PlanError::TooManyStops(budget.stops_needed));
    }

    let available: Vec<&S> = stations
        .iter()
        .filter(|station| station.status() == StationStatus::Available)
        .filter(|station| offers_required_charger(*station, options))
        .collect();

    if available.is_empty() {
        warn!(
            catalog_size = stations.len(),
            "no available charging stations for route planning"
        );
        return Ok(PlanResult {
            stops: Vec::new(),
            warnings: vec![PlanWarning::NoAvailableStations],
        });
    }

    let max_leg_km = vehicle_range_km * options.reach_fraction;
    let segments = (budget.stops_needed + 1) as f64;
    let mut walker = RouteWalker::new(&route.polyline);
    let mut current = route.origin;
    let mut result = PlanResult::empty();

    for i in 0..budget.stops_needed {
        let stop = i + 1;
        let target_km = route.total_distance_km / segments * stop as f64;

        let target = match walker.as_mut() {
            Some(walker) => walker.advance_to(target_km).coordinate,
            None => interpolate(route.origin, route.destination, stop as f64 / segments),
        };

        let mut candidates = reachable_from(current, available.iter().copied(), max_leg_km);
        if let Some(max_deviation_km) = options.max_target_deviation_km {
            candidates = reachable_from(target, candidates, max_deviation_km);
        }

        match select_nearest(target, &candidates) {
            Some(station) => {
                debug!(
                    stop,
                    station_id = station.id(),
                    target_km,
                    candidates = candidates.len(),
                    "selected charging stop"
                );
                current = station.position();
                result.stops.push(station.clone());
            }
            None => {
                warn!(stop, target_km, "coverage gap: no reachable charging station");
                result.warnings.push(PlanWarning::CoverageGap { stop });
            }
        }
    }

    Ok(result)
}

/// Plans independent requests in parallel. Results keep request order.
pub fn plan_batch<S>(
    requests: &[PlanRequest<S>],
    options: &PlannerOptions,
) -> Vec<Result<PlanResult<S>, PlanError>>
where
    S: ChargingStation + Clone + Send + Sync,
{
    requests
        .par_iter()
        .map(|request| {
            plan_with_options(
                &request.route,
                &request.stations,
                request.vehicle_range_km,
                options,
            )
        })
        .collect()
}

/// Fetches directions from `provider`, then plans stops along them.
pub fn plan_trip<P, S>(
    provider: &P,
    origin: Coordinate,
    destination: Coordinate,
    stations: &[S],
    vehicle_range_km: f64,
    options: &PlannerOptions,
) -> Result<TripPlan<S>, PlanError>
where
    P: DirectionsProvider,
    S: ChargingStation + Clone,
{
    for coord in [origin, destination] {
        if !coord.is_valid() {
            return Err(PlanError::InvalidCoordinate(coord));
        }
    }

    let directions = provider.directions(origin, destination).inspect_err(|err| {
        warn!(error = %err, "directions lookup failed");
    })?;
    let total_duration_hours = directions.total_duration_hours;
    let route = RouteInput::from_directions(origin, destination, directions);
    let result = plan_with_options(&route, stations, vehicle_range_km, options)?;

    Ok(TripPlan {
        route,
        total_duration_hours,
        result,
    })
}

fn validate(route: &RouteInput, vehicle_range_km: f64) -> Result<(), PlanError> {
    if !vehicle_range_km.is_finite() || vehicle_range_km <= 0.0 {
        return Err(PlanError::InvalidRange(vehicle_range_km));
    }
    if !route.total_distance_km.is_finite() || route.total_distance_km < 0.0 {
        return Err(PlanError::InvalidDistance(route.total_distance_km));
    }
    for coord in [route.origin, route.destination] {
        if !coord.is_valid() {
            return Err(PlanError::InvalidCoordinate(coord));
        }
    }
    Ok(())
}

fn validate_options(options: &PlannerOptions) -> Result<(), PlanError> {
    let fractions = [
        ("no_stop_fraction", options.no_stop_fraction),
        ("inter_stop_fraction", options.inter_stop_fraction),
        ("reach_fraction", options.reach_fraction),
    ];
    for (name, value) in fractions {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(PlanError::InvalidOption { name, value });
        }
    }

    if let Some(value) = options.max_target_deviation_km {
        if !value.is_finite() || value < 0.0 {
            return Err(PlanError::InvalidOption {
                name: "max_target_deviation_km",
                value,
            });
        }
    }

    Ok(())
}

fn offers_required_charger<S: ChargingStation>(station: &S, options: &PlannerOptions) -> bool {
    options.required_charger_types.is_empty()
        || station
            .charger_types()
            .iter()
            .any(|kind| options.required_charger_types.contains(kind))
}
