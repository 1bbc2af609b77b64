//! Network construction errors.
//!
//! These are all "input invalid" failures: the tables handed to the builder
//! do not describe a consistent network. They are reported before any query
//! runs.

use crate::domain::{RouteId, StopId, UnknownMode};

/// Errors raised while building a [`super::Network`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    /// No stops were supplied
    #[error("stop table is empty")]
    NoStops,

    /// No routes were supplied
    #[error("route table is empty")]
    NoRoutes,

    /// A stop references a route that is not in the route table
    #[error("stop {stop} references unknown route {route}")]
    UnknownRoute { stop: StopId, route: RouteId },

    /// A transfer references a stop that is not in the stop table
    #[error("transfer {from} -> {to} references unknown stop {missing}")]
    UnknownStop {
        from: StopId,
        to: StopId,
        missing: StopId,
    },

    /// A transfer leads from a stop to itself
    #[error("transfer from stop {0} to itself")]
    SelfTransfer(StopId),

    /// A transfer carries a distance that is not a positive finite number
    #[error("transfer {from} -> {to} has invalid distance {distance}")]
    InvalidTransferDistance {
        from: StopId,
        to: StopId,
        distance: f64,
    },

    /// The same route id appears with different attributes
    #[error("route {0} appears with conflicting attributes")]
    ConflictingRoute(RouteId),

    /// Route type cannot be mapped to a mode
    #[error(transparent)]
    UnknownMode(#[from] UnknownMode),

    /// Configuration is unusable
    #[error("invalid network config: {0}")]
    InvalidConfig(String),
}
