//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::Coordinate;
use crate::geocode::Geocoder;
use crate::planner::{Endpoint, PlanError, PlanRequest, RoutePlanner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<G>(state: AppState<G>) -> Router
where
    G: Geocoder + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/network", get(network_summary::<G>))
        .route("/api/stops/nearest", get(nearest_stops::<G>))
        .route("/api/plan", post(plan_journey::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Size of the loaded network.
async fn network_summary<G>(State(state): State<AppState<G>>) -> Json<NetworkSummary> {
    Json(NetworkSummary {
        stops: state.network.stop_count(),
        routes: state.network.route_count(),
        transfers: state.network.transfer_count(),
    })
}

/// Stops within walking distance of a point.
async fn nearest_stops<G>(
    State(state): State<AppState<G>>,
    Query(req): Query<NearestStopsRequest>,
) -> Result<Json<NearestStopsResponse>, AppError> {
    let at = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let planner = RoutePlanner::new(&state.network, &state.config);
    let stops = planner
        .nearest_stops(at)
        .iter()
        .map(|n| NearbyStopResult::from_nearby(&state.network, n))
        .collect();

    Ok(Json(NearestStopsResponse { stops }))
}

/// Plan a journey between two points or addresses.
async fn plan_journey<G>(
    State(state): State<AppState<G>>,
    Json(req): Json<PlanJourneyRequest>,
) -> Result<Json<PlanJourneyResponse>, AppError>
where
    G: Geocoder + Send + Sync + 'static,
{
    let origin = req
        .origin
        .into_place()
        .map_err(|message| AppError::BadRequest {
            message: format!("invalid origin: {message}"),
        })?;
    let destination = req
        .destination
        .into_place()
        .map_err(|message| AppError::BadRequest {
            message: format!("invalid destination: {message}"),
        })?;

    let planner = RoutePlanner::new(&state.network, &state.config);
    let geocoder = state.geocoder.as_ref();

    // Both lookups go out at once
    let (from, to) = futures::try_join!(
        planner.resolve(geocoder, &origin, Endpoint::Origin),
        planner.resolve(geocoder, &destination, Endpoint::Destination),
    )?;

    let result = planner.plan(&PlanRequest::new(from, to))?;

    Ok(Json(PlanJourneyResponse::from_result(&state.network, &result)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::InvalidRequest(_) => AppError::BadRequest { message },
            PlanError::AddressUnresolved { .. }
            | PlanError::NoNearbyStops { .. }
            | PlanError::NoCandidatePaths => AppError::NotFound { message },
            PlanError::Geocoding { .. } => AppError::BadGateway { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
