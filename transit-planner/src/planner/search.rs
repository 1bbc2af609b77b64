//! Query orchestration.
//!
//! A query flows nearest stops -> path enumeration -> ranking against a
//! shared, read-only [`Network`]. Address endpoints are first resolved
//! through a [`Geocoder`].

use std::fmt;

use tracing::debug;

use crate::domain::{Coordinate, StopId};
use crate::geocode::{AddressQuery, GeocodeError, Geocoder};
use crate::network::Network;

use super::config::PlannerConfig;
use super::enumerate::enumerate_paths;
use super::nearest::{NearbyStop, nearest_stops};
use super::rank::{Itinerary, RankedPath, select_paths};

/// Which end of the journey an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Malformed query
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The geocoder found no match for an address
    #[error("could not find {endpoint} address: {address}")]
    AddressUnresolved { endpoint: Endpoint, address: String },

    /// The geocoder itself failed
    #[error("geocoding {endpoint} failed: {message}")]
    Geocoding { endpoint: Endpoint, message: String },

    /// No stop within walking distance of an endpoint
    #[error("no stops within walking distance of the {endpoint}")]
    NoNearbyStops { endpoint: Endpoint },

    /// Stops were found but no route connects them with at most one transfer
    #[error("no route with at most one transfer")]
    NoCandidatePaths,
}

impl PlanError {
    fn from_geocode(endpoint: Endpoint, query: &AddressQuery, err: GeocodeError) -> Self {
        if err.is_not_found() {
            PlanError::AddressUnresolved {
                endpoint,
                address: query.to_string(),
            }
        } else {
            PlanError::Geocoding {
                endpoint,
                message: err.to_string(),
            }
        }
    }
}

/// Where a journey starts or ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    Point(Coordinate),
    Address(AddressQuery),
}

/// Request for a route between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Result of route planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Selected itineraries, best first.
    pub itineraries: Vec<Itinerary>,

    /// Stops considered at the origin, nearest first.
    pub origin_stops: Vec<NearbyStop>,

    /// Stops considered at the destination, nearest first.
    pub destination_stops: Vec<NearbyStop>,

    /// Number of candidate paths enumerated before ranking.
    pub candidates_considered: usize,
}

/// Stateless route planner over a shared network.
pub struct RoutePlanner<'a> {
    network: &'a Network,
    config: &'a PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a PlannerConfig) -> Self {
        Self { network, config }
    }

    /// Stops within the configured walking radius of `at`, nearest first.
    pub fn nearest_stops(&self, at: Coordinate) -> Vec<NearbyStop> {
        nearest_stops(self.network, at, self.config.walking_radius_km)
    }

    /// Plan between two coordinates.
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        let origin_stops = self.nearest_stops(request.origin);
        if origin_stops.is_empty() {
            return Err(PlanError::NoNearbyStops {
                endpoint: Endpoint::Origin,
            });
        }

        let destination_stops = self.nearest_stops(request.destination);
        if destination_stops.is_empty() {
            return Err(PlanError::NoNearbyStops {
                endpoint: Endpoint::Destination,
            });
        }

        let origins: Vec<StopId> = origin_stops.iter().map(|s| s.stop_id.clone()).collect();
        let destinations: Vec<StopId> =
            destination_stops.iter().map(|s| s.stop_id.clone()).collect();

        let candidates = enumerate_paths(self.network, &origins, &destinations);
        let candidates_considered = candidates.len();
        debug!(
            origin_stops = origins.len(),
            destination_stops = destinations.len(),
            candidates = candidates_considered,
            "enumerated paths"
        );

        let ranked = select_paths(self.network, candidates, self.config)?;
        let itineraries = ranked
            .iter()
            .map(|r| Itinerary::describe(self.network, r))
            .collect();

        Ok(PlanResult {
            itineraries,
            origin_stops,
            destination_stops,
            candidates_considered,
        })
    }

    /// Plan between explicit candidate stop lists, skipping the
    /// nearest-stop step.
    pub fn plan_between_stops(
        &self,
        origins: &[StopId],
        destinations: &[StopId],
    ) -> Result<Vec<RankedPath>, PlanError> {
        let candidates = enumerate_paths(self.network, origins, destinations);
        select_paths(self.network, candidates, self.config)
    }

    /// Resolve a place to a coordinate, geocoding addresses.
    pub async fn resolve<G: Geocoder>(
        &self,
        geocoder: &G,
        place: &Place,
        endpoint: Endpoint,
    ) -> Result<Coordinate, PlanError> {
        match place {
            Place::Point(coordinate) => Ok(*coordinate),
            Place::Address(query) => {
                if query.is_blank() {
                    return Err(PlanError::InvalidRequest(format!(
                        "{endpoint} address is empty"
                    )));
                }
                let location = geocoder
                    .locate(query)
                    .await
                    .map_err(|e| PlanError::from_geocode(endpoint, query, e))?;
                debug!(
                    %endpoint,
                    address = %query,
                    coordinate = %location.coordinate,
                    "resolved address"
                );
                Ok(location.coordinate)
            }
        }
    }

    /// Stops within walking distance of an address.
    pub async fn locate<G: Geocoder>(
        &self,
        geocoder: &G,
        query: &AddressQuery,
        endpoint: Endpoint,
    ) -> Result<Vec<NearbyStop>, PlanError> {
        let at = self
            .resolve(geocoder, &Place::Address(query.clone()), endpoint)
            .await?;
        Ok(self.nearest_stops(at))
    }
}
