//! End-to-end tests for route planning.

use super::*;
use crate::domain::{Coordinate, RouteId, Stop, StopId, great_circle_km};
use crate::geocode::{AddressQuery, GeocodeError, Geocoder, Location};
use crate::network::{Network, NetworkBuilder, NetworkConfig, TransferRecord};
use std::collections::HashMap;

fn stop_id(s: &str) -> StopId {
    StopId::parse(s).unwrap()
}

fn route_id(s: &str) -> RouteId {
    RouteId::parse(s).unwrap()
}

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

/// Routes are `(id, route_type)`, stops `(id, name, lat, lon, routes)` and
/// transfers `(from, to, km)`.
fn make_network(
    routes: &[(&str, &str)],
    stops: &[(&str, &str, f64, f64, &[&str])],
    transfers: &[(&str, &str, f64)],
) -> Network {
    let mut builder = NetworkBuilder::new(NetworkConfig::default());
    for (id, route_type) in routes {
        builder.add_route(route_id(id), *id, "", route_type).unwrap();
    }
    for (id, name, lat, lon, stop_routes) in stops {
        let mut stop = Stop::new(stop_id(id), *name, coord(*lat, *lon));
        for r in *stop_routes {
            stop = stop.with_route(route_id(r));
        }
        builder.add_stop(stop);
    }
    builder.with_transfers(
        transfers
            .iter()
            .map(|(from, to, km)| TransferRecord {
                from: stop_id(from),
                to: stop_id(to),
                distance_km: Some(*km),
            })
            .collect(),
    );
    builder.build().unwrap()
}

/// Two subway lines side by side with walks A->B and C->D, plus an
/// unconnected line far away.
fn two_lines() -> Network {
    make_network(
        &[("R1", "1"), ("R2", "1"), ("R3", "1")],
        &[
            ("A", "Alpha", 40.400, -3.700, &["R1"]),
            ("B", "Bravo", 40.401, -3.701, &["R2"]),
            ("C", "Charlie", 40.420, -3.680, &["R1"]),
            ("D", "Delta", 40.421, -3.681, &["R2"]),
            ("E", "Echo", 40.450, -3.650, &["R3"]),
        ],
        &[("A", "B", 0.1), ("C", "D", 0.1)],
    )
}

fn distance(network: &Network, a: &str, b: &str) -> f64 {
    let at = |id: &str| network.stop(&stop_id(id)).unwrap().coordinate;
    great_circle_km(at(a), at(b))
}

#[test]
fn one_transfer_between_lines() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let candidates = enumerate_paths(&network, &[stop_id("A")], &[stop_id("D")]);
    let expected = CandidatePath {
        origin: stop_id("A"),
        origin_route: route_id("R1"),
        mid1: stop_id("A"),
        mid2: stop_id("B"),
        destination_route: route_id("R2"),
        destination: stop_id("D"),
    };
    assert!(candidates.contains(&expected));
    assert!(candidates.iter().all(|p| !p.is_direct()));

    let selected = planner
        .plan_between_stops(&[stop_id("A")], &[stop_id("D")])
        .unwrap();

    // Both candidates are subway -> subway, so one survives. The walk at
    // A->B is a hair cheaper than the one at C->D.
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].path, expected);

    let via_b = distance(&network, "A", "B") + distance(&network, "B", "D");
    assert!((selected[0].cost_km - via_b).abs() < 1e-9);
}

#[test]
fn same_corridor_keeps_lower_cost() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let candidates = enumerate_paths(&network, &[stop_id("A")], &[stop_id("D")]);
    assert_eq!(candidates.len(), 2);

    let cheapest = candidates
        .iter()
        .map(|p| path_cost(&network, p, &config).unwrap())
        .fold(f64::INFINITY, f64::min);

    let selected = planner
        .plan_between_stops(&[stop_id("A")], &[stop_id("D")])
        .unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].cost_km, cheapest);
}

#[test]
fn direct_path_ranks_ahead_with_bonus() {
    // O is on subway R1 and bus B1; walking O->T puts the bus rider on R1
    let network = make_network(
        &[("R1", "1"), ("B1", "3")],
        &[
            ("O", "Origin", 40.4000, -3.7000, &["R1", "B1"]),
            ("T", "Transfer", 40.4005, -3.7005, &["R1"]),
            ("D", "Destination", 40.4200, -3.6800, &["R1"]),
        ],
        &[("O", "T", 0.07)],
    );
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let candidates = enumerate_paths(&network, &[stop_id("O")], &[stop_id("D")]);
    assert_eq!(candidates.iter().filter(|p| p.is_direct()).count(), 1);
    assert_eq!(candidates.len(), 2);

    let direct_raw = distance(&network, "O", "D");
    let transfer_raw = distance(&network, "O", "T") + distance(&network, "T", "D");
    assert!(transfer_raw - direct_raw < 0.2);

    let selected = planner
        .plan_between_stops(&[stop_id("O")], &[stop_id("D")])
        .unwrap();
    assert_eq!(selected.len(), 2);
    assert!(selected[0].path.is_direct());
    assert!((selected[0].cost_km - (direct_raw - 0.6)).abs() < 1e-9);
    assert!(selected[1].cost_km - selected[0].cost_km >= 0.6 - 1e-6);
}

#[test]
fn empty_destinations_is_no_candidates() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    assert!(enumerate_paths(&network, &[stop_id("A")], &[]).is_empty());

    let err = planner.plan_between_stops(&[stop_id("A")], &[]).unwrap_err();
    assert_eq!(err, PlanError::NoCandidatePaths);
}

#[test]
fn plan_from_coordinates() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let request = PlanRequest::new(coord(40.4001, -3.7001), coord(40.4209, -3.6809));
    let result = planner.plan(&request).unwrap();

    assert_eq!(result.origin_stops[0].stop_id, stop_id("A"));
    assert_eq!(result.destination_stops[0].stop_id, stop_id("D"));
    assert!(result.candidates_considered >= 2);

    // A-C and B-D are both direct subway rides; only the cheaper one is kept
    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert_eq!(itinerary.transfers, 0);
    assert_eq!(itinerary.origin_mode_label, "subway");
    assert_eq!(itinerary.destination_mode_label, "subway");
    assert_eq!(itinerary.mid1_label, itinerary.origin_label);
    assert_eq!(itinerary.mid2_label, itinerary.destination_label);
}

#[test]
fn no_nearby_stops_is_distinct() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);
    let nowhere = coord(41.0, -3.0);
    let near_a = coord(40.4001, -3.7001);

    let err = planner.plan(&PlanRequest::new(nowhere, near_a)).unwrap_err();
    assert_eq!(
        err,
        PlanError::NoNearbyStops {
            endpoint: Endpoint::Origin
        }
    );

    let err = planner.plan(&PlanRequest::new(near_a, nowhere)).unwrap_err();
    assert_eq!(
        err,
        PlanError::NoNearbyStops {
            endpoint: Endpoint::Destination
        }
    );

    // Stops on both ends, but nothing links R1/R2 to R3
    let near_e = coord(40.4501, -3.6501);
    let err = planner.plan(&PlanRequest::new(near_a, near_e)).unwrap_err();
    assert_eq!(err, PlanError::NoCandidatePaths);
}

#[test]
fn rebuilding_network_gives_same_answers() {
    let first = two_lines();
    let second = two_lines();
    assert_eq!(first, second);

    let config = PlannerConfig::default();
    let request = PlanRequest::new(coord(40.4001, -3.7001), coord(40.4209, -3.6809));

    let a = RoutePlanner::new(&first, &config).plan(&request).unwrap();
    let b = RoutePlanner::new(&second, &config).plan(&request).unwrap();
    assert_eq!(a, b);
}

#[test]
fn failed_query_leaves_network_usable() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);
    let before = network.clone();

    assert!(planner.plan_between_stops(&[], &[]).is_err());
    assert!(
        planner
            .plan_between_stops(&[stop_id("A")], &[stop_id("D")])
            .is_ok()
    );
    assert_eq!(network, before);
}

/// Mock geocoder for testing.
struct MockGeocoder {
    known: HashMap<String, Coordinate>,
    unavailable: bool,
}

impl MockGeocoder {
    fn new() -> Self {
        Self {
            known: HashMap::new(),
            unavailable: false,
        }
    }

    fn add(&mut self, query: &AddressQuery, at: Coordinate) {
        self.known.insert(query.to_string(), at);
    }
}

impl Geocoder for MockGeocoder {
    async fn locate(&self, query: &AddressQuery) -> Result<Location, GeocodeError> {
        if self.unavailable {
            return Err(GeocodeError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        self.known
            .get(&query.to_string())
            .map(|&coordinate| Location {
                coordinate,
                display_name: query.to_string(),
            })
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))
    }
}

fn alpha_street() -> AddressQuery {
    AddressQuery::new("1", "Calle Alfa", "Madrid")
}

fn delta_street() -> AddressQuery {
    AddressQuery::new("9", "Calle Delta", "Madrid")
}

#[tokio::test]
async fn locate_address_finds_stops() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let mut geocoder = MockGeocoder::new();
    geocoder.add(&alpha_street(), coord(40.4001, -3.7001));

    let stops = planner
        .locate(&geocoder, &alpha_street(), Endpoint::Origin)
        .await
        .unwrap();
    assert_eq!(stops[0].stop_id, stop_id("A"));
}

#[tokio::test]
async fn unknown_address_is_unresolved() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);
    let geocoder = MockGeocoder::new();

    let err = planner
        .locate(&geocoder, &delta_street(), Endpoint::Destination)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PlanError::AddressUnresolved {
            endpoint: Endpoint::Destination,
            address: "9 Calle Delta, Madrid".into(),
        }
    );
}

#[tokio::test]
async fn geocoder_failure_is_reported() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);
    let mut geocoder = MockGeocoder::new();
    geocoder.unavailable = true;

    let err = planner
        .resolve(&geocoder, &Place::Address(alpha_street()), Endpoint::Origin)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PlanError::Geocoding {
            endpoint: Endpoint::Origin,
            ..
        }
    ));

    // Points never touch the geocoder
    let at = coord(40.4, -3.7);
    let resolved = planner
        .resolve(&geocoder, &Place::Point(at), Endpoint::Origin)
        .await
        .unwrap();
    assert_eq!(resolved, at);
}

#[tokio::test]
async fn blank_address_is_invalid() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let blank = AddressQuery::new("", " ", "");
    let err = planner
        .resolve(&MockGeocoder::new(), &Place::Address(blank), Endpoint::Origin)
        .await
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidRequest(_)));
}

#[tokio::test]
async fn plan_between_addresses() {
    let network = two_lines();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let mut geocoder = MockGeocoder::new();
    geocoder.add(&alpha_street(), coord(40.4001, -3.7001));
    geocoder.add(&delta_street(), coord(40.4209, -3.6809));

    let origin = Place::Address(alpha_street());
    let destination = Place::Address(delta_street());
    let (from, to) = futures::try_join!(
        planner.resolve(&geocoder, &origin, Endpoint::Origin),
        planner.resolve(&geocoder, &destination, Endpoint::Destination),
    )
    .unwrap();

    let result = planner.plan(&PlanRequest::new(from, to)).unwrap();
    assert!(!result.itineraries.is_empty());
}
