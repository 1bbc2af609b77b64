//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;
use crate::geocode::AddressQuery;
use crate::network::Network;
use crate::planner::{Itinerary, NearbyStop, Place, PlanResult};

/// One end of a journey: either a point or a postal address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    Point {
        lat: f64,
        lon: f64,
    },
    Address {
        #[serde(default)]
        house_number: Option<String>,
        street: String,
        city: String,
    },
}

impl LocationInput {
    /// Validate into a planner place.
    pub fn into_place(self) -> Result<Place, String> {
        match self {
            LocationInput::Point { lat, lon } => Coordinate::new(lat, lon)
                .map(Place::Point)
                .map_err(|e| e.to_string()),
            LocationInput::Address {
                house_number,
                street,
                city,
            } => Ok(Place::Address(AddressQuery::new(
                house_number.as_deref().unwrap_or(""),
                &street,
                &city,
            ))),
        }
    }
}

/// Request to plan a journey.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    pub origin: LocationInput,
    pub destination: LocationInput,
}

/// Query for stops near a point.
#[derive(Debug, Deserialize)]
pub struct NearestStopsRequest {
    pub lat: f64,
    pub lon: f64,
}

/// A stop near a query point.
#[derive(Debug, Serialize)]
pub struct NearbyStopResult {
    pub stop_id: String,

    /// Stop name, or the id if the stop has none
    pub name: String,

    /// Straight-line distance from the query point
    pub distance_km: f64,

    /// Short labels of the routes serving the stop
    pub routes: Vec<String>,
}

/// Response listing nearby stops.
#[derive(Debug, Serialize)]
pub struct NearestStopsResponse {
    pub stops: Vec<NearbyStopResult>,
}

/// A journey option.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub origin: String,
    pub origin_route: String,
    pub origin_mode: String,
    pub mid1: String,
    pub mid2: String,
    pub destination_route: String,
    pub destination_mode: String,
    pub destination: String,
    pub cost_km: f64,
    pub transfers: usize,

    /// One-line description, e.g. "Sol - subway_L1 - Gran Via"
    pub summary: String,
}

/// Response for journey planning.
#[derive(Debug, Serialize)]
pub struct PlanJourneyResponse {
    /// Journey options, best first
    pub itineraries: Vec<ItineraryResult>,

    /// Stops considered near the origin
    pub origin_stops: Vec<NearbyStopResult>,

    /// Stops considered near the destination
    pub destination_stops: Vec<NearbyStopResult>,

    /// Number of candidate paths before ranking
    pub candidates_considered: usize,
}

/// Size of the loaded network.
#[derive(Debug, Serialize)]
pub struct NetworkSummary {
    pub stops: usize,
    pub routes: usize,
    pub transfers: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl NearbyStopResult {
    /// Describe a nearby stop using the network's names.
    pub fn from_nearby(network: &Network, nearby: &NearbyStop) -> Self {
        let stop = network.stop(&nearby.stop_id);
        let routes = network
            .routes_of(&nearby.stop_id)
            .iter()
            .map(|id| {
                network
                    .route(id)
                    .map_or_else(|| id.to_string(), |r| r.short_name.clone())
            })
            .collect();

        Self {
            stop_id: nearby.stop_id.to_string(),
            name: stop.map_or_else(|| nearby.stop_id.to_string(), |s| s.name.clone()),
            distance_km: nearby.distance_km,
            routes,
        }
    }
}

impl ItineraryResult {
    /// Create from a planner itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            origin: itinerary.origin_label.clone(),
            origin_route: itinerary.origin_route_label.clone(),
            origin_mode: itinerary.origin_mode_label.clone(),
            mid1: itinerary.mid1_label.clone(),
            mid2: itinerary.mid2_label.clone(),
            destination_route: itinerary.destination_route_label.clone(),
            destination_mode: itinerary.destination_mode_label.clone(),
            destination: itinerary.destination_label.clone(),
            cost_km: itinerary.cost_km,
            transfers: itinerary.transfers,
            summary: summarize(itinerary),
        }
    }
}

impl PlanJourneyResponse {
    /// Create from a planner result.
    pub fn from_result(network: &Network, result: &PlanResult) -> Self {
        let stops = |list: &[NearbyStop]| {
            list.iter()
                .map(|n| NearbyStopResult::from_nearby(network, n))
                .collect()
        };

        Self {
            itineraries: result
                .itineraries
                .iter()
                .map(ItineraryResult::from_itinerary)
                .collect(),
            origin_stops: stops(&result.origin_stops),
            destination_stops: stops(&result.destination_stops),
            candidates_considered: result.candidates_considered,
        }
    }
}

/// Render an itinerary as `stop - mode_Lroute - stop` ride segments.
fn summarize(itinerary: &Itinerary) -> String {
    let first = format!(
        "{} - {}_L{}",
        itinerary.origin_label, itinerary.origin_mode_label, itinerary.origin_route_label
    );

    if itinerary.transfers == 0 {
        return format!("{first} - {}", itinerary.destination_label);
    }

    format!(
        "{first} - {} - {} - {}_L{} - {}",
        itinerary.mid1_label,
        itinerary.mid2_label,
        itinerary.destination_mode_label,
        itinerary.destination_route_label,
        itinerary.destination_label
    )
}
