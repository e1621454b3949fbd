//! Polyline representation for route geometries, and a forward-only walker
//! that locates the point a given driving distance from the route start.
//!
//! Encoding/decoding of wire formats happens at the boundary (the OSRM
//! adapter), not here.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;
use crate::traits::Coordinate;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

/// Where a walk along a polyline stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkPosition {
    pub coordinate: Coordinate,
    pub reached_index: usize,
    /// Distance from the first polyline point to `reached_index`.
    pub accumulated_km: f64,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total haversine length of the polyline in kilometers.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .sum()
    }

    /// Position at the first point, or `None` for an empty polyline.
    pub fn start(&self) -> Option<WalkPosition> {
        self.points.first().map(|&coordinate| WalkPosition {
            coordinate,
            reached_index: 0,
            accumulated_km: 0.0,
        })
    }

    /// Walks forward from `from` until the accumulated distance reaches
    /// `target_distance_km`, or the last point if the polyline is shorter.
    ///
    /// Returns the vertex where the walk stopped, not an interpolated point
    /// inside the segment. The result never lies before `from`. On an empty
    /// polyline `from` is returned unchanged.
    pub fn point_at_distance(&self, target_distance_km: f64, from: WalkPosition) -> WalkPosition {
        if self.points.is_empty() {
            return from;
        }

        let mut index = from.reached_index.min(self.points.len().saturating_sub(1));
        let mut accumulated_km = from.accumulated_km;

        while accumulated_km < target_distance_km && index + 1 < self.points.len() {
            accumulated_km += haversine_km(self.points[index], self.points[index + 1]);
            index += 1;
        }

        WalkPosition {
            coordinate: self.points[index],
            reached_index: index,
            accumulated_km,
        }
    }
}

/// Stateful cursor over a polyline for successive, increasing targets.
#[derive(Debug, Clone)]
pub struct RouteWalker<'a> {
    polyline: &'a Polyline,
    position: WalkPosition,
}

impl<'a> RouteWalker<'a> {
    /// Returns `None` when the polyline has no points.
    pub fn new(polyline: &'a Polyline) -> Option<Self> {
        let position = polyline.start()?;
        Some(Self { polyline, position })
    }

    pub fn position(&self) -> WalkPosition {
        self.position
    }

    /// Advances to `target_distance_km` from the route start and returns the
    /// new position. A target behind the cursor leaves it where it is.
    pub fn advance_to(&mut self, target_distance_km: f64) -> WalkPosition {
        self.position = self
            .polyline
            .point_at_distance(target_distance_km, self.position);
        self.position
    }
}
