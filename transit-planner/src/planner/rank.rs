//! Path scoring and selection.
//!
//! Candidates are scored by the great-circle length of their three legs and
//! then filtered down to a short, diverse list: the best path always
//! survives, later paths survive only if they open a new corridor (pair of
//! modes) and are not much longer than the best.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{Mode, RouteId, StopId, great_circle_km};
use crate::network::{Entity, Field, Network};

use super::config::PlannerConfig;
use super::enumerate::CandidatePath;
use super::search::PlanError;

/// Diversity key: the modes ridden on the first and last leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorridorKey {
    pub origin_mode: Mode,
    pub destination_mode: Mode,
}

impl CorridorKey {
    /// Key for a path, or `None` if either route is unknown.
    pub fn of(network: &Network, path: &CandidatePath) -> Option<Self> {
        Some(Self {
            origin_mode: network.route(&path.origin_route)?.mode,
            destination_mode: network.route(&path.destination_route)?.mode,
        })
    }
}

/// Cost of a path in km: origin to `mid1`, `mid1` to `mid2`, `mid2` to
/// destination. Direct paths get the configured bonus subtracted, so the
/// result can be negative.
///
/// Returns `None` if a stop on the path is unknown.
pub fn path_cost(network: &Network, path: &CandidatePath, config: &PlannerConfig) -> Option<f64> {
    let at = |id: &StopId| network.stop(id).map(|s| s.coordinate);

    let origin = at(&path.origin)?;
    let mid1 = at(&path.mid1)?;
    let mid2 = at(&path.mid2)?;
    let destination = at(&path.destination)?;

    let length = great_circle_km(origin, mid1)
        + great_circle_km(mid1, mid2)
        + great_circle_km(mid2, destination);

    if path.is_direct() {
        Some(length - config.direct_path_bonus_km)
    } else {
        Some(length)
    }
}

/// A selected path with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPath {
    pub path: CandidatePath,
    pub cost_km: f64,
    pub key: CorridorKey,
}

/// Score, sort and filter candidates. Output is best first.
///
/// Ties in cost keep enumeration order. Candidates referring to stops or
/// routes the network does not know are skipped.
pub fn select_paths(
    network: &Network,
    candidates: Vec<CandidatePath>,
    config: &PlannerConfig,
) -> Result<Vec<RankedPath>, PlanError> {
    if candidates.is_empty() {
        return Err(PlanError::NoCandidatePaths);
    }

    let mut scored: Vec<RankedPath> = candidates
        .into_iter()
        .filter_map(|path| {
            let scored = path_cost(network, &path, config).zip(CorridorKey::of(network, &path));
            match scored {
                Some((cost_km, key)) => Some(RankedPath { path, cost_km, key }),
                None => {
                    warn!(?path, "skipping path through unknown stop or route");
                    None
                }
            }
        })
        .collect();

    // Stable: equal costs keep enumeration order
    scored.sort_by(|a, b| a.cost_km.total_cmp(&b.cost_km));

    let Some(best) = scored.first().map(|p| p.cost_km) else {
        return Err(PlanError::NoCandidatePaths);
    };
    let cutoff = best + config.max_excess_cost_km;

    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    for ranked in scored {
        // Sorted, so nothing later can come back under the cutoff
        if ranked.cost_km > cutoff {
            break;
        }
        if seen.insert(ranked.key) {
            selected.push(ranked);
        }
    }

    Ok(selected)
}

/// A selected path in display terms, ready for a presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub origin_label: String,
    pub origin_route_label: String,
    pub origin_mode_label: String,
    pub mid1_label: String,
    pub mid2_label: String,
    pub destination_route_label: String,
    pub destination_mode_label: String,
    pub destination_label: String,
    pub cost_km: f64,
    pub transfers: usize,
}

impl Itinerary {
    /// Resolve labels for a ranked path. Missing names fall back to ids.
    pub fn describe(network: &Network, ranked: &RankedPath) -> Self {
        let stop_label = |id: &StopId| {
            network
                .attribute(Entity::Stop(id), Field::Name)
                .and_then(|a| a.as_text())
                .unwrap_or(id.as_str())
                .to_string()
        };
        let path = &ranked.path;
        let route_label = |id: &RouteId| {
            network
                .attribute(Entity::Route(id), Field::Name)
                .and_then(|a| a.as_text())
                .unwrap_or(id.as_str())
                .to_string()
        };

        Self {
            origin_label: stop_label(&path.origin),
            origin_route_label: route_label(&path.origin_route),
            origin_mode_label: ranked.key.origin_mode.label().to_string(),
            mid1_label: stop_label(&path.mid1),
            mid2_label: stop_label(&path.mid2),
            destination_route_label: route_label(&path.destination_route),
            destination_mode_label: ranked.key.destination_mode.label().to_string(),
            destination_label: stop_label(&path.destination),
            cost_km: ranked.cost_km,
            transfers: path.transfer_count(),
        }
    }
}
