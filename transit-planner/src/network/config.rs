//! Configuration for building the transit network.

use super::NetworkError;

/// Parameters that shape the network at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Maximum straight-line distance (km) for a walking transfer between stops.
    pub walking_radius_km: f64,

    /// Drop transfers between stops that already share a route.
    /// Riders can stay on the line instead of walking.
    pub same_route_transfers_excluded: bool,

    /// Route-id prefix marking a bus route as intercity.
    /// `None` treats every bus as a city bus.
    pub intercity_bus_prefix: Option<String>,
}

impl NetworkConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        walking_radius_km: f64,
        same_route_transfers_excluded: bool,
        intercity_bus_prefix: Option<String>,
    ) -> Self {
        Self {
            walking_radius_km,
            same_route_transfers_excluded,
            intercity_bus_prefix,
        }
    }

    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if !self.walking_radius_km.is_finite() || self.walking_radius_km <= 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "walking radius must be a positive distance, got {}",
                self.walking_radius_km
            )));
        }

        if self.intercity_bus_prefix.as_deref() == Some("") {
            return Err(NetworkError::InvalidConfig(
                "intercity bus prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            walking_radius_km: 0.25,
            same_route_transfers_excluded: true,
            intercity_bus_prefix: Some("8".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NetworkConfig::default();

        assert_eq!(config.walking_radius_km, 0.25);
        assert!(config.same_route_transfers_excluded);
        assert_eq!(config.intercity_bus_prefix.as_deref(), Some("8"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_config() {
        let config = NetworkConfig::new(0.5, false, None);

        assert_eq!(config.walking_radius_km, 0.5);
        assert!(!config.same_route_transfers_excluded);
        assert!(config.intercity_bus_prefix.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_radius() {
        assert!(NetworkConfig::new(0.0, true, None).validate().is_err());
        assert!(NetworkConfig::new(-1.0, true, None).validate().is_err());
        assert!(NetworkConfig::new(f64::NAN, true, None).validate().is_err());
    }

    #[test]
    fn rejects_empty_prefix() {
        let config = NetworkConfig::new(0.25, true, Some(String::new()));
        assert!(config.validate().is_err());
    }
}
