//! Application state for the web layer.

use std::sync::Arc;

use crate::network::Network;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains everything needed to answer a request. The network is read-only
/// and shared by all requests.
pub struct AppState<G> {
    /// Loaded transit network
    pub network: Arc<Network>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,

    /// Address resolver
    pub geocoder: Arc<G>,
}

impl<G> AppState<G> {
    /// Create a new app state.
    pub fn new(network: Network, config: PlannerConfig, geocoder: G) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
            geocoder: Arc::new(geocoder),
        }
    }
}

// Manual impl: cloning shares the Arcs and needs no `G: Clone`.
impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            network: Arc::clone(&self.network),
            config: Arc::clone(&self.config),
            geocoder: Arc::clone(&self.geocoder),
        }
    }
}
