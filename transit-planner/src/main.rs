use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_planner::cache::{CacheConfig, CachedGeocoder};
use transit_planner::geocode::{GeocoderConfig, NominatimClient};
use transit_planner::network::tables::TRANSFERS_FILE;
use transit_planner::network::{NetworkConfig, load_network, write_transfers};
use transit_planner::planner::PlannerConfig;
use transit_planner::web::{AppState, create_router};

/// Read an environment variable, falling back to `default` when unset or
/// unparseable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "ignoring unparseable environment variable");
            default
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = PathBuf::from(env_or("TRANSIT_DATA_DIR", "data".to_string()));
    let addr: SocketAddr = env_or("TRANSIT_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)));

    // Network config
    let defaults = NetworkConfig::default();
    let intercity_bus_prefix = match std::env::var("TRANSIT_INTERCITY_BUS_PREFIX") {
        Ok(prefix) if prefix.is_empty() => None,
        Ok(prefix) => Some(prefix),
        Err(_) => defaults.intercity_bus_prefix.clone(),
    };
    let network_config = NetworkConfig::new(
        env_or("TRANSIT_WALKING_RADIUS_KM", defaults.walking_radius_km),
        env_or(
            "TRANSIT_SAME_ROUTE_TRANSFERS_EXCLUDED",
            defaults.same_route_transfers_excluded,
        ),
        intercity_bus_prefix,
    );

    // Planner config
    let defaults = PlannerConfig::default();
    let planner_config = PlannerConfig::new(
        network_config.walking_radius_km,
        env_or("TRANSIT_DIRECT_PATH_BONUS_KM", defaults.direct_path_bonus_km),
        env_or("TRANSIT_MAX_EXCESS_COST_KM", defaults.max_excess_cost_km),
    );
    if let Err(message) = planner_config.validate() {
        panic!("Invalid planner configuration: {message}");
    }

    // Load the network, saving derived transfers for the next start
    info!(dir = %data_dir.display(), "loading network");
    let transfers_path = data_dir.join(TRANSFERS_FILE);
    let had_transfers = transfers_path.exists();
    let network = load_network(&data_dir, &network_config).expect("Failed to load network");
    if !had_transfers {
        match write_transfers(&transfers_path, network.transfers()) {
            Ok(()) => info!(path = %transfers_path.display(), "saved derived transfers"),
            Err(e) => warn!(error = %e, "could not save derived transfers"),
        }
    }

    // Geocoder
    let mut geocoder_config = GeocoderConfig::default();
    if let Ok(url) = std::env::var("NOMINATIM_URL") {
        geocoder_config = geocoder_config.with_base_url(url);
    }
    if let Ok(user_agent) = std::env::var("NOMINATIM_USER_AGENT") {
        geocoder_config = geocoder_config.with_user_agent(user_agent);
    }
    let nominatim = NominatimClient::new(geocoder_config).expect("Failed to create geocoder");
    let geocoder = CachedGeocoder::new(nominatim, &CacheConfig::default());

    let state = AppState::new(network, planner_config, geocoder);
    let app = create_router(state);

    info!("Transit planner listening on http://{addr}");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/network        - Network size");
    info!("  GET  /api/stops/nearest  - Stops near ?lat=&lon=");
    info!("  POST /api/plan           - Plan a journey");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
