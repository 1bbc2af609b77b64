//! Route planner with at most one transfer.
//!
//! This module answers: "how do I get from here to there using one line, or
//! two lines and a short walk between them?"
//!
//! Both endpoints are widened to the stops within walking distance. Every
//! direct and one-transfer path between those stop sets is enumerated, then
//! scored by straight-line leg length and thinned to one path per corridor.

mod config;
mod enumerate;
mod nearest;
mod rank;
mod search;

#[cfg(test)]
mod search_tests;

pub use config::PlannerConfig;
pub use enumerate::{CandidatePath, enumerate_paths};
pub use nearest::{NearbyStop, nearest_stops};
pub use rank::{CorridorKey, Itinerary, RankedPath, path_cost, select_paths};
pub use search::{Endpoint, Place, PlanError, PlanRequest, PlanResult, RoutePlanner};
