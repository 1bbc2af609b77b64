//! Domain types for the transit planner.
//!
//! This module contains the validated building blocks of the network:
//! identifiers, coordinates, modes, stops and routes, plus the distance
//! function every other layer measures with. Types check their invariants at
//! construction time.

mod coordinate;
mod geo;
mod ids;
mod mode;
mod stop;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use geo::{EARTH_RADIUS_KM, distance_matrix, distances_from, great_circle_km};
pub use ids::{InvalidId, RouteId, StopId};
pub use mode::{Mode, UnknownMode};
pub use stop::{Route, Stop};
