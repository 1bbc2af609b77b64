//! Transit route planner.
//!
//! Answers "how do I get from A to B using at most one transfer?" over a
//! city transit network loaded from GTFS-derived tables. Endpoints may be
//! points or postal addresses; addresses are resolved through a geocoder.

pub mod cache;
pub mod domain;
pub mod geocode;
pub mod network;
pub mod planner;
pub mod web;
