//! The in-memory transit network.
//!
//! A [`Network`] holds stops, routes and transfers together with the indices
//! the planner queries: routes of a stop, stops of a route and transfers out
//! of a stop. It is assembled once by [`NetworkBuilder`] and never mutated
//! afterwards, so it can be shared between concurrent queries behind an
//! `Arc`.
//!
//! All indices are ordered maps and sets. Building twice from the same
//! tables yields the same iteration order, and therefore the same query
//! results.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::domain::{Coordinate, Mode, Route, RouteId, Stop, StopId, great_circle_km};

use super::transfers::{Transfer, TransferGraphBuilder};
use super::{NetworkConfig, NetworkError};

static NO_ROUTES: BTreeSet<RouteId> = BTreeSet::new();
static NO_STOPS: BTreeSet<StopId> = BTreeSet::new();

/// An entity whose attributes can be looked up.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Stop(&'a StopId),
    Route(&'a RouteId),
}

/// Attribute names understood by [`Network::attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Stop name, or route short label.
    Name,
    /// Route long label.
    LongName,
    /// Stop coordinate.
    Coordinate,
    /// Route mode.
    Mode,
}

/// Value of a looked-up attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute<'a> {
    Text(&'a str),
    Coordinate(Coordinate),
    Mode(Mode),
}

impl<'a> Attribute<'a> {
    /// The value as text, if it is textual.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Attribute::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A precomputed transfer row. The distance is recomputed from stop
/// coordinates when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    pub from: StopId,
    pub to: StopId,
    pub distance_km: Option<f64>,
}

/// Read-only transit network.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    stops: BTreeMap<StopId, Stop>,
    routes: BTreeMap<RouteId, Route>,
    stops_by_route: BTreeMap<RouteId, BTreeSet<StopId>>,
    transfers_from: BTreeMap<StopId, Vec<(StopId, f64)>>,
    transfers: Vec<Transfer>,
}

impl Network {
    /// Routes serving a stop. Empty for unknown stops.
    pub fn routes_of(&self, stop: &StopId) -> &BTreeSet<RouteId> {
        self.stops.get(stop).map(|s| &s.routes).unwrap_or(&NO_ROUTES)
    }

    /// Stops on a route. Empty for unknown routes.
    pub fn stops_of(&self, route: &RouteId) -> &BTreeSet<StopId> {
        self.stops_by_route.get(route).unwrap_or(&NO_STOPS)
    }

    /// Stops reachable on foot from `stop`, with the walking distance in km.
    pub fn transfer_targets(&self, stop: &StopId) -> &[(StopId, f64)] {
        self.transfers_from
            .get(stop)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a scalar attribute of a stop or route.
    ///
    /// Returns `None` for unknown entities and for fields the entity does not
    /// have (e.g. the mode of a stop).
    pub fn attribute(&self, entity: Entity<'_>, field: Field) -> Option<Attribute<'_>> {
        match entity {
            Entity::Stop(id) => {
                let stop = self.stops.get(id)?;
                match field {
                    Field::Name => Some(Attribute::Text(&stop.name)),
                    Field::Coordinate => Some(Attribute::Coordinate(stop.coordinate)),
                    Field::LongName | Field::Mode => None,
                }
            }
            Entity::Route(id) => {
                let route = self.routes.get(id)?;
                match field {
                    Field::Name => Some(Attribute::Text(&route.short_name)),
                    Field::LongName => Some(Attribute::Text(&route.long_name)),
                    Field::Mode => Some(Attribute::Mode(route.mode)),
                    Field::Coordinate => None,
                }
            }
        }
    }

    /// Get a stop by id.
    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Get a route by id.
    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    /// All stops, ordered by id.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    /// All routes, ordered by id.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// All transfer edges.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }
}

/// Assembles a [`Network`] from route, stop and (optionally) transfer rows.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    config: NetworkConfig,
    routes: BTreeMap<RouteId, Route>,
    stops: BTreeMap<StopId, Stop>,
    transfers: Option<Vec<TransferRecord>>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Add a route, resolving its mode from the GTFS `route_type`.
    ///
    /// Repeating an identical route is allowed; repeating an id with
    /// different attributes is an error.
    pub fn add_route(
        &mut self,
        id: RouteId,
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        route_type: &str,
    ) -> Result<&mut Self, NetworkError> {
        let mode = Mode::from_route_type(
            route_type,
            id.as_str(),
            self.config.intercity_bus_prefix.as_deref(),
        )?;
        let route = Route::new(id, short_name, long_name, mode);

        match self.routes.get(&route.id) {
            Some(existing) if existing != &route => {
                return Err(NetworkError::ConflictingRoute(route.id));
            }
            Some(_) => {}
            None => {
                self.routes.insert(route.id.clone(), route);
            }
        }

        Ok(self)
    }

    /// Add a stop.
    ///
    /// The stop table lists one row per (stop, route) pair, so a stop id may
    /// be added several times; the route sets are merged. A station with
    /// several entrances repeats its id with each entrance's coordinate. The
    /// first row's name and coordinate are kept.
    pub fn add_stop(&mut self, stop: Stop) -> &mut Self {
        match self.stops.get_mut(&stop.id) {
            Some(existing) => {
                if existing.name != stop.name || existing.coordinate != stop.coordinate {
                    warn!(
                        stop = %stop.id,
                        kept = %existing.coordinate,
                        ignored = %stop.coordinate,
                        "repeated stop row differs, keeping the first"
                    );
                }
                existing.routes.extend(stop.routes);
            }
            None => {
                self.stops.insert(stop.id.clone(), stop);
            }
        }

        self
    }

    /// Use a precomputed transfer table instead of deriving one.
    pub fn with_transfers(&mut self, transfers: Vec<TransferRecord>) -> &mut Self {
        self.transfers = Some(transfers);
        self
    }

    /// Validate the input and build the indices.
    pub fn build(self) -> Result<Network, NetworkError> {
        self.config.validate()?;

        if self.routes.is_empty() {
            return Err(NetworkError::NoRoutes);
        }
        if self.stops.is_empty() {
            return Err(NetworkError::NoStops);
        }

        let mut stops_by_route: BTreeMap<RouteId, BTreeSet<StopId>> = self
            .routes
            .keys()
            .map(|id| (id.clone(), BTreeSet::new()))
            .collect();

        for stop in self.stops.values() {
            for route in &stop.routes {
                let members =
                    stops_by_route
                        .get_mut(route)
                        .ok_or_else(|| NetworkError::UnknownRoute {
                            stop: stop.id.clone(),
                            route: route.clone(),
                        })?;
                members.insert(stop.id.clone());
            }
        }

        let transfers = match self.transfers {
            Some(records) => {
                debug!(count = records.len(), "using precomputed transfers");
                resolve_transfers(&self.stops, records, &self.config)?
            }
            None => {
                let stops: Vec<Stop> = self.stops.values().cloned().collect();
                TransferGraphBuilder::from_config(&self.config).build(&stops)
            }
        };

        let mut transfers_from: BTreeMap<StopId, Vec<(StopId, f64)>> = BTreeMap::new();
        for t in &transfers {
            transfers_from
                .entry(t.from.clone())
                .or_default()
                .push((t.to.clone(), t.distance_km));
        }

        info!(
            stops = self.stops.len(),
            routes = self.routes.len(),
            transfers = transfers.len(),
            "network built"
        );

        Ok(Network {
            stops: self.stops,
            routes: self.routes,
            stops_by_route,
            transfers_from,
            transfers,
        })
    }
}

/// Check precomputed transfers against the stop table, filling in missing
/// distances.
///
/// A stored table may have been derived under a different configuration.
/// Rows at or beyond the walking radius, or joining stops on a common route
/// while same-route transfers are excluded, are dropped.
fn resolve_transfers(
    stops: &BTreeMap<StopId, Stop>,
    records: Vec<TransferRecord>,
    config: &NetworkConfig,
) -> Result<Vec<Transfer>, NetworkError> {
    let mut seen: BTreeSet<(StopId, StopId)> = BTreeSet::new();
    let mut transfers = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        if record.from == record.to {
            return Err(NetworkError::SelfTransfer(record.from));
        }

        let lookup = |id: &StopId| {
            stops.get(id).ok_or_else(|| NetworkError::UnknownStop {
                from: record.from.clone(),
                to: record.to.clone(),
                missing: id.clone(),
            })
        };
        let from = lookup(&record.from)?;
        let to = lookup(&record.to)?;

        let distance_km = match record.distance_km {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(d) => {
                return Err(NetworkError::InvalidTransferDistance {
                    from: record.from,
                    to: record.to,
                    distance: d,
                });
            }
            None => great_circle_km(from.coordinate, to.coordinate),
        };

        let too_far = distance_km >= config.walking_radius_km;
        let same_route = config.same_route_transfers_excluded && from.shares_route_with(to);
        if too_far || same_route {
            debug!(
                from = %record.from,
                to = %record.to,
                distance_km,
                too_far,
                same_route,
                "dropping precomputed transfer"
            );
            dropped += 1;
            continue;
        }

        // Duplicate rows collapse onto the first occurrence
        if seen.insert((record.from.clone(), record.to.clone())) {
            transfers.push(Transfer::new(record.from, record.to, distance_km));
        }
    }

    if dropped > 0 {
        warn!(
            dropped,
            radius_km = config.walking_radius_km,
            exclude_same_route = config.same_route_transfers_excluded,
            "precomputed transfers do not match the network config"
        );
    }

    Ok(transfers)
}
