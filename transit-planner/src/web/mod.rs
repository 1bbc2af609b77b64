//! Web layer for the transit planner.
//!
//! Provides a JSON API for finding nearby stops and planning journeys.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
