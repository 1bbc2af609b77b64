//! Nearest-stop lookup.

use crate::domain::{Coordinate, StopId, great_circle_km};
use crate::network::Network;

/// A stop within walking distance of a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStop {
    pub stop_id: StopId,
    pub distance_km: f64,
}

/// Stops strictly closer than `radius_km` to `at`, nearest first.
///
/// Stops at equal distance keep network order. Returns an empty list when
/// nothing is in range.
pub fn nearest_stops(network: &Network, at: Coordinate, radius_km: f64) -> Vec<NearbyStop> {
    let mut nearby: Vec<NearbyStop> = network
        .stops()
        .filter_map(|stop| {
            let distance_km = great_circle_km(at, stop.coordinate);
            (distance_km < radius_km).then(|| NearbyStop {
                stop_id: stop.id.clone(),
                distance_km,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}
