//! Stops and routes.

use std::collections::BTreeSet;

use super::{Coordinate, Mode, RouteId, StopId};

/// A boardable location and the routes that call there.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinate: Coordinate,
    pub routes: BTreeSet<RouteId>,
}

impl Stop {
    /// Create a stop with no routes yet.
    pub fn new(id: StopId, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            routes: BTreeSet::new(),
        }
    }

    /// Add a route to this stop (builder style).
    pub fn with_route(mut self, route: RouteId) -> Self {
        self.routes.insert(route);
        self
    }

    /// True if both stops are served by at least one common route.
    pub fn shares_route_with(&self, other: &Stop) -> bool {
        !self.routes.is_disjoint(&other.routes)
    }
}

/// A transit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    /// Short public label, e.g. "1" or "C5".
    pub short_name: String,
    /// Long label, usually the termini.
    pub long_name: String,
    pub mode: Mode,
}

impl Route {
    pub fn new(
        id: RouteId,
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        mode: Mode,
    ) -> Self {
        Self {
            id,
            short_name: short_name.into(),
            long_name: long_name.into(),
            mode,
        }
    }
}
