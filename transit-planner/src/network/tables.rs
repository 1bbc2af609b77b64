//! CSV tables produced by the feed preprocessing step.
//!
//! The planner consumes three processed tables from a data directory:
//!
//! - `routes.csv`: `route_id, route_short_name, route_long_name, route_type`
//! - `stops.csv`: `stop_id, stop_name, stop_lat, stop_lon, route_id`, one row
//!   per (stop, route) pair
//! - `transfers.csv` (optional): `transfer_id, transfer_from, transfer_to[, distance]`
//!
//! When the transfer table is missing it is derived from the stops, and can
//! be written back with [`write_transfers`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Coordinate, RouteId, Stop, StopId};

use super::store::{Network, NetworkBuilder, TransferRecord};
use super::transfers::Transfer;
use super::{NetworkConfig, NetworkError};

pub const ROUTES_FILE: &str = "routes.csv";
pub const STOPS_FILE: &str = "stops.csv";
pub const TRANSFERS_FILE: &str = "transfers.csv";

/// Errors reading or writing network tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or a field of the wrong type
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A well-formed row with an invalid value
    #[error("{} row {row}: {message}", path.display())]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },

    /// The tables do not form a consistent network
    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    route_id: String,
    route_short_name: String,
    route_long_name: String,
    route_type: String,
}

#[derive(Debug, Deserialize)]
struct StopRow {
    stop_id: String,
    stop_name: String,
    stop_lat: f64,
    stop_lon: f64,
    route_id: String,
}

#[derive(Debug, Deserialize)]
struct TransferRow {
    transfer_from: String,
    transfer_to: String,
    #[serde(default)]
    distance: Option<f64>,
}

#[derive(Debug, Serialize)]
struct TransferOutRow<'a> {
    transfer_id: String,
    transfer_from: &'a str,
    transfer_to: &'a str,
    distance: f64,
}

/// A route row with a validated id. The mode is resolved by the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub id: RouteId,
    pub short_name: String,
    pub long_name: String,
    pub route_type: String,
}

/// One (stop, route) row with validated id and coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    pub id: StopId,
    pub name: String,
    pub coordinate: Coordinate,
    pub route: RouteId,
}

/// Deserialize every row of a CSV file, converting each with `convert`.
fn read_rows<R, T>(
    path: &Path,
    convert: impl Fn(R) -> Result<T, String>,
) -> Result<Vec<T>, TableError>
where
    R: for<'de> Deserialize<'de>,
{
    let mut reader = csv::Reader::from_path(path).map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let row: R = result.map_err(|source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        // Data rows are numbered from 1, after the header
        let record = convert(row).map_err(|message| TableError::InvalidRow {
            path: path.to_path_buf(),
            row: idx + 1,
            message,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Read the route table.
pub fn read_routes(path: &Path) -> Result<Vec<RouteRecord>, TableError> {
    read_rows(path, |row: RouteRow| {
        Ok(RouteRecord {
            id: RouteId::parse(&row.route_id).map_err(|e| e.to_string())?,
            short_name: row.route_short_name,
            long_name: row.route_long_name,
            route_type: row.route_type,
        })
    })
}

/// Read the stop table.
pub fn read_stops(path: &Path) -> Result<Vec<StopRecord>, TableError> {
    read_rows(path, |row: StopRow| {
        Ok(StopRecord {
            id: StopId::parse(&row.stop_id).map_err(|e| e.to_string())?,
            name: row.stop_name,
            coordinate: Coordinate::new(row.stop_lat, row.stop_lon)
                .map_err(|e| e.to_string())?,
            route: RouteId::parse(&row.route_id).map_err(|e| e.to_string())?,
        })
    })
}

/// Read a precomputed transfer table.
pub fn read_transfers(path: &Path) -> Result<Vec<TransferRecord>, TableError> {
    read_rows(path, |row: TransferRow| {
        Ok(TransferRecord {
            from: StopId::parse(&row.transfer_from).map_err(|e| e.to_string())?,
            to: StopId::parse(&row.transfer_to).map_err(|e| e.to_string())?,
            distance_km: row.distance,
        })
    })
}

/// Write a transfer table that [`read_transfers`] can load back.
pub fn write_transfers(path: &Path, transfers: &[Transfer]) -> Result<(), TableError> {
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for t in transfers {
        writer
            .serialize(TransferOutRow {
                transfer_id: t.id(),
                transfer_from: t.from.as_str(),
                transfer_to: t.to.as_str(),
                distance: t.distance_km,
            })
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Load a network from a directory of processed tables.
///
/// Transfers are read from `transfers.csv` if present, otherwise derived
/// from stop coordinates using `config`. Stored rows that `config` would not
/// produce are dropped.
pub fn load_network(dir: &Path, config: &NetworkConfig) -> Result<Network, TableError> {
    let mut builder = NetworkBuilder::new(config.clone());

    for route in read_routes(&dir.join(ROUTES_FILE))? {
        builder.add_route(route.id, route.short_name, route.long_name, &route.route_type)?;
    }

    for stop in read_stops(&dir.join(STOPS_FILE))? {
        builder.add_stop(Stop::new(stop.id, stop.name, stop.coordinate).with_route(stop.route));
    }

    let transfers_path = dir.join(TRANSFERS_FILE);
    if transfers_path.exists() {
        builder.with_transfers(read_transfers(&transfers_path)?);
    } else {
        info!(dir = %dir.display(), "no transfer table, deriving transfers from stops");
    }

    Ok(builder.build()?)
}
