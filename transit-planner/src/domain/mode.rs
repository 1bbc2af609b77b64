//! Transport modes.

use std::fmt;

/// Error returned when a route type code does not map to a known mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route type: {0:?}")]
pub struct UnknownMode(pub String);

/// Transport category of a route.
///
/// This is a closed set: every route in the network is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    Subway,
    LightSubway,
    Rail,
    CityBus,
    IntercityBus,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Mode; 5] = [
        Mode::Subway,
        Mode::LightSubway,
        Mode::Rail,
        Mode::CityBus,
        Mode::IntercityBus,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Subway => "subway",
            Mode::LightSubway => "light subway",
            Mode::Rail => "rail",
            Mode::CityBus => "city bus",
            Mode::IntercityBus => "intercity bus",
        }
    }

    /// Resolve the mode of a route from its GTFS `route_type` column.
    ///
    /// The code may be bare (`"3"`) or carry the `mode_` prefix written by the
    /// feed preprocessing step (`"mode_3"`). Both the basic and the extended
    /// GTFS route types are understood.
    ///
    /// GTFS has a single bus type, so buses are split using
    /// `intercity_bus_prefix`: a bus route whose id starts with the prefix is
    /// an intercity bus, any other bus is a city bus. With no prefix every
    /// bus is a city bus.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::Mode;
    ///
    /// assert_eq!(Mode::from_route_type("mode_1", "4__1___", Some("8")).unwrap(), Mode::Subway);
    /// assert_eq!(Mode::from_route_type("3", "8__450___", Some("8")).unwrap(), Mode::IntercityBus);
    /// assert_eq!(Mode::from_route_type("3", "6__27___", Some("8")).unwrap(), Mode::CityBus);
    /// assert!(Mode::from_route_type("mode_x", "R1", None).is_err());
    /// ```
    pub fn from_route_type(
        route_type: &str,
        route_id: &str,
        intercity_bus_prefix: Option<&str>,
    ) -> Result<Self, UnknownMode> {
        let code = route_type.trim();
        let code = code.strip_prefix("mode_").unwrap_or(code);
        let code: u16 = code
            .parse()
            .map_err(|_| UnknownMode(route_type.to_string()))?;

        let mode = match code {
            0 | 900..=906 => Mode::LightSubway,
            1 | 400..=404 => Mode::Subway,
            2 | 100..=117 => Mode::Rail,
            200..=209 => Mode::IntercityBus,
            3 | 700..=716 => {
                let intercity =
                    intercity_bus_prefix.is_some_and(|prefix| route_id.starts_with(prefix));
                if intercity {
                    Mode::IntercityBus
                } else {
                    Mode::CityBus
                }
            }
            _ => return Err(UnknownMode(route_type.to_string())),
        };

        Ok(mode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
