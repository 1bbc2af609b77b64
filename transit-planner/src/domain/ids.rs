//! Stop and route identifier types.

use std::fmt;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id {value:?}: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    value: String,
    reason: &'static str,
}

fn check(kind: &'static str, s: &str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId {
            kind,
            value: s.to_string(),
            reason: "must not be empty",
        });
    }

    if s.trim() != s {
        return Err(InvalidId {
            kind,
            value: s.to_string(),
            reason: "must not have surrounding whitespace",
        });
    }

    Ok(())
}

/// Identifier of a boardable stop, as it appears in the source feed.
///
/// Ids are opaque strings. The only guarantee is that they are non-empty
/// and carry no surrounding whitespace, so two ids compare equal exactly
/// when the feed meant the same stop.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::StopId;
///
/// let sol = StopId::parse("par_4_1").unwrap();
/// assert_eq!(sol.as_str(), "par_4_1");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse(" par_4_1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check("stop", s)?;
        Ok(StopId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a transit line.
///
/// Some feeds encode the operator in the id (e.g. intercity buses in the
/// Madrid feed start with `8`); see [`crate::domain::Mode::from_route_type`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        check("route", s)?;
        Ok(RouteId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
