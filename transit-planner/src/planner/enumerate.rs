//! Candidate path enumeration.
//!
//! Generates every path from a set of origin stops to a set of destination
//! stops that uses either a single route, or two routes joined by one
//! walking transfer. Longer paths are never produced. The output is raw:
//! duplicates and dominated paths are left for the ranker.

use crate::domain::{RouteId, StopId};
use crate::network::Network;

/// A candidate itinerary with at most one transfer.
///
/// For a direct path `origin_route == destination_route`, `mid1 == origin`
/// and `mid2 == destination`. Otherwise the rider rides `origin_route` from
/// `origin` to `mid1`, walks to `mid2`, and rides `destination_route` to
/// `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidatePath {
    pub origin: StopId,
    pub origin_route: RouteId,
    pub mid1: StopId,
    pub mid2: StopId,
    pub destination_route: RouteId,
    pub destination: StopId,
}

impl CandidatePath {
    /// A single-route path.
    pub fn direct(origin: StopId, route: RouteId, destination: StopId) -> Self {
        Self {
            mid1: origin.clone(),
            mid2: destination.clone(),
            origin,
            origin_route: route.clone(),
            destination_route: route,
            destination,
        }
    }

    /// True if no transfer is involved.
    pub fn is_direct(&self) -> bool {
        self.origin_route == self.destination_route
    }

    /// Number of transfers (0 or 1).
    pub fn transfer_count(&self) -> usize {
        if self.is_direct() { 0 } else { 1 }
    }
}

/// Enumerate direct and one-transfer paths between the candidate stops.
///
/// Stops unknown to the network contribute nothing. Either list being empty
/// yields an empty result.
pub fn enumerate_paths(
    network: &Network,
    origins: &[StopId],
    destinations: &[StopId],
) -> Vec<CandidatePath> {
    let mut paths = Vec::new();

    for origin in origins {
        for destination in destinations {
            for origin_route in network.routes_of(origin) {
                for destination_route in network.routes_of(destination) {
                    if origin_route == destination_route {
                        paths.push(CandidatePath::direct(
                            origin.clone(),
                            origin_route.clone(),
                            destination.clone(),
                        ));
                        continue;
                    }

                    for mid1 in network.stops_of(origin_route) {
                        for (mid2, _) in network.transfer_targets(mid1) {
                            if network.routes_of(mid2).contains(destination_route) {
                                paths.push(CandidatePath {
                                    origin: origin.clone(),
                                    origin_route: origin_route.clone(),
                                    mid1: mid1.clone(),
                                    mid2: mid2.clone(),
                                    destination_route: destination_route.clone(),
                                    destination: destination.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    paths
}
