//! Range budget: how many charging stops a trip needs.

/// Fraction of vehicle range a trip may use without any stop.
pub const NO_STOP_FRACTION: f64 = 0.8;

/// Fraction of vehicle range used to space stops along the route.
pub const INTER_STOP_FRACTION: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBudget {
    pub stops_needed: usize,
    pub no_stop_threshold_km: f64,
    pub inter_stop_threshold_km: f64,
}

impl RangeBudget {
    /// Budget with the default safety margins.
    pub fn compute(total_distance_km: f64, vehicle_range_km: f64) -> Self {
        Self::with_fractions(
            total_distance_km,
            vehicle_range_km,
            NO_STOP_FRACTION,
            INTER_STOP_FRACTION,
        )
    }

    /// Budget with explicit margins.
    ///
    /// The two fractions are independent: stops are spaced by
    /// `inter_stop_fraction` while the no-stop check uses `no_stop_fraction`.
    /// A non-positive or non-finite range yields zero stops.
    pub fn with_fractions(
        total_distance_km: f64,
        vehicle_range_km: f64,
        no_stop_fraction: f64,
        inter_stop_fraction: f64,
    ) -> Self {
        let no_stop_threshold_km = vehicle_range_km * no_stop_fraction;
        let inter_stop_threshold_km = vehicle_range_km * inter_stop_fraction;

        let usable = vehicle_range_km.is_finite()
            && vehicle_range_km > 0.0
            && total_distance_km.is_finite()
            && inter_stop_threshold_km > 0.0;

        let stops_needed = if !usable || total_distance_km <= no_stop_threshold_km {
            0
        } else {
            ((total_distance_km / inter_stop_threshold_km).ceil() - 1.0).max(0.0) as usize
        };

        Self {
            stops_needed,
            no_stop_threshold_km,
            inter_stop_threshold_km,
        }
    }
}
