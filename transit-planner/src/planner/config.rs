//! Configuration for route planning queries.

/// Parameters for finding and ranking paths.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Maximum straight-line distance (km) from a query point to a
    /// candidate stop.
    pub walking_radius_km: f64,

    /// Bonus (km) subtracted from the cost of direct paths.
    /// Prefers no-transfer trips when the distances are close.
    pub direct_path_bonus_km: f64,

    /// Paths costing more than the best path plus this (km) are dropped.
    pub max_excess_cost_km: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(walking_radius_km: f64, direct_path_bonus_km: f64, max_excess_cost_km: f64) -> Self {
        Self {
            walking_radius_km,
            direct_path_bonus_km,
            max_excess_cost_km,
        }
    }

    /// Check the parameters are usable. Returns a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.walking_radius_km.is_finite() || self.walking_radius_km <= 0.0 {
            return Err(format!(
                "walking radius must be a positive distance, got {}",
                self.walking_radius_km
            ));
        }

        if !self.direct_path_bonus_km.is_finite() || self.direct_path_bonus_km < 0.0 {
            return Err(format!(
                "direct path bonus must be a non-negative distance, got {}",
                self.direct_path_bonus_km
            ));
        }

        if !self.max_excess_cost_km.is_finite() || self.max_excess_cost_km < 0.0 {
            return Err(format!(
                "max excess cost must be a non-negative distance, got {}",
                self.max_excess_cost_km
            ));
        }

        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            walking_radius_km: 0.25,
            direct_path_bonus_km: 0.6,
            max_excess_cost_km: 2.0,
        }
    }
}
