//! Walking transfers between nearby stops.
//!
//! Transfers are not part of the source feed. They are derived from stop
//! coordinates: any two stops closer than the walking radius are connected
//! in both directions. Each direction is a separate edge since paths are
//! directional.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{Coordinate, Stop, StopId, distances_from};

use super::NetworkConfig;

/// A directed walking connection between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub from: StopId,
    pub to: StopId,
    pub distance_km: f64,
}

impl Transfer {
    pub fn new(from: StopId, to: StopId, distance_km: f64) -> Self {
        Self {
            from,
            to,
            distance_km,
        }
    }

    /// Stable identifier used when the transfer table is persisted.
    pub fn id(&self) -> String {
        format!("{}_to_{}", self.from, self.to)
    }
}

/// Derives the transfer graph for a set of stops.
///
/// This evaluates the full distance matrix, which is quadratic in the number
/// of stops. That is fine for a single metropolitan network (a few thousand
/// stops); rows are computed in parallel.
#[derive(Debug, Clone)]
pub struct TransferGraphBuilder {
    radius_km: f64,
    exclude_same_route: bool,
}

impl TransferGraphBuilder {
    /// Create a builder.
    ///
    /// Pairs closer than `radius_km` (and not coincident) become transfers.
    /// With `exclude_same_route`, pairs served by a common route are skipped.
    pub fn new(radius_km: f64, exclude_same_route: bool) -> Self {
        Self {
            radius_km,
            exclude_same_route,
        }
    }

    /// Create a builder from the network configuration.
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(
            config.walking_radius_km,
            config.same_route_transfers_excluded,
        )
    }

    /// Compute every transfer edge between `stops`.
    ///
    /// Output is ordered by origin stop (in input order), then by target
    /// stop (in input order).
    pub fn build(&self, stops: &[Stop]) -> Vec<Transfer> {
        let coordinates: Vec<Coordinate> = stops.iter().map(|s| s.coordinate).collect();

        let transfers: Vec<Transfer> = stops
            .par_iter()
            .enumerate()
            .flat_map_iter(|(i, from)| {
                distances_from(from.coordinate, &coordinates)
                    .into_iter()
                    .enumerate()
                    .filter(|&(j, distance)| {
                        j != i
                            && distance > 0.0
                            && distance < self.radius_km
                            && !(self.exclude_same_route && from.shares_route_with(&stops[j]))
                    })
                    .map(|(j, distance)| {
                        Transfer::new(from.id.clone(), stops[j].id.clone(), distance)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        debug!(
            stops = stops.len(),
            transfers = transfers.len(),
            radius_km = self.radius_km,
            exclude_same_route = self.exclude_same_route,
            "derived transfer graph"
        );

        transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteId, great_circle_km};

    fn stop(id: &str, lat: f64, lon: f64, routes: &[&str]) -> Stop {
        let mut s = Stop::new(
            StopId::parse(id).unwrap(),
            id,
            Coordinate::new(lat, lon).unwrap(),
        );
        for r in routes {
            s = s.with_route(RouteId::parse(r).unwrap());
        }
        s
    }

    fn pairs(transfers: &[Transfer]) -> Vec<(&str, &str)> {
        transfers
            .iter()
            .map(|t| (t.from.as_str(), t.to.as_str()))
            .collect()
    }

    #[test]
    fn nearby_stops_connect_both_ways() {
        let stops = vec![
            stop("A", 40.400, -3.700, &["R1"]),
            stop("B", 40.401, -3.701, &["R2"]),
            stop("C", 40.420, -3.680, &["R1"]),
        ];

        let transfers = TransferGraphBuilder::new(0.25, true).build(&stops);

        assert_eq!(pairs(&transfers), vec![("A", "B"), ("B", "A")]);
        let expected = great_circle_km(stops[0].coordinate, stops[1].coordinate);
        assert_eq!(transfers[0].distance_km, expected);
        assert_eq!(transfers[1].distance_km, expected);
    }

    #[test]
    fn same_route_pairs_excluded_when_configured() {
        let stops = vec![
            stop("A", 40.400, -3.700, &["R1"]),
            stop("B", 40.401, -3.701, &["R1", "R2"]),
        ];

        let strict = TransferGraphBuilder::new(0.25, true).build(&stops);
        assert!(strict.is_empty());

        let lenient = TransferGraphBuilder::new(0.25, false).build(&stops);
        assert_eq!(pairs(&lenient), vec![("A", "B"), ("B", "A")]);
    }

    #[test]
    fn radius_is_exclusive() {
        let stops = vec![
            stop("A", 40.400, -3.700, &["R1"]),
            stop("B", 40.401, -3.701, &["R2"]),
        ];
        let d = great_circle_km(stops[0].coordinate, stops[1].coordinate);

        assert!(TransferGraphBuilder::new(d, false).build(&stops).is_empty());
        assert_eq!(
            TransferGraphBuilder::new(d + 1e-9, false).build(&stops).len(),
            2
        );
    }

    #[test]
    fn coincident_stops_are_not_connected() {
        let stops = vec![
            stop("A", 40.400, -3.700, &["R1"]),
            stop("B", 40.400, -3.700, &["R2"]),
        ];

        assert!(TransferGraphBuilder::new(0.25, false).build(&stops).is_empty());
    }

    #[test]
    fn from_config_uses_radius_and_flag() {
        let stops = vec![
            stop("A", 40.400, -3.700, &["R1"]),
            stop("B", 40.403, -3.700, &["R2"]), // ~0.33 km
        ];

        let narrow = NetworkConfig::default();
        assert!(TransferGraphBuilder::from_config(&narrow).build(&stops).is_empty());

        let wide = NetworkConfig::new(0.5, true, None);
        assert_eq!(TransferGraphBuilder::from_config(&wide).build(&stops).len(), 2);
    }

    #[test]
    fn transfer_id() {
        let t = Transfer::new(StopId::parse("A").unwrap(), StopId::parse("B").unwrap(), 0.1);
        assert_eq!(t.id(), "A_to_B");
    }

    #[test]
    fn empty_input() {
        assert!(TransferGraphBuilder::new(0.25, true).build(&[]).is_empty());
    }
}
