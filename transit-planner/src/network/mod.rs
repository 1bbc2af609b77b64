//! The transit network: stops, routes and walking transfers.
//!
//! The network is built once from processed feed tables and is read-only
//! afterwards. Transfers are derived from stop coordinates unless a
//! precomputed table is supplied.

mod config;
mod error;
mod store;
pub mod tables;
mod transfers;

pub use config::NetworkConfig;
pub use error::NetworkError;
pub use store::{Attribute, Entity, Field, Network, NetworkBuilder, TransferRecord};
pub use tables::{TableError, load_network, write_transfers};
pub use transfers::{Transfer, TransferGraphBuilder};
