//! Address geocoding.
//!
//! Turns a free-text postal address into a coordinate. The planner only
//! depends on the [`Geocoder`] trait; [`NominatimClient`] is the production
//! implementation and [`crate::cache::CachedGeocoder`] memoises lookups.

mod client;
mod error;

use std::fmt;
use std::future::Future;

use crate::domain::Coordinate;

pub use client::{BoundingBox, GeocoderConfig, NominatimClient};
pub use error::GeocodeError;

/// A postal address to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressQuery {
    /// House number and street, e.g. "12 Calle de Alcala".
    pub street: String,
    pub city: String,
}

impl AddressQuery {
    /// Build a query from its parts. The house number is folded into the
    /// street the way structured geocoders expect it.
    pub fn new(house_number: &str, street: &str, city: &str) -> Self {
        let house_number = house_number.trim();
        let street = street.trim();
        let street = if house_number.is_empty() {
            street.to_string()
        } else {
            format!("{house_number} {street}")
        };

        Self {
            street,
            city: city.trim().to_string(),
        }
    }

    /// True if there is nothing to look up.
    pub fn is_blank(&self) -> bool {
        self.street.trim().is_empty() && self.city.trim().is_empty()
    }
}

impl fmt::Display for AddressQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.street, self.city)
    }
}

/// A resolved address.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub coordinate: Coordinate,
    /// Full address as the geocoder understood it, for confirmation.
    pub display_name: String,
}

/// Resolves addresses to coordinates.
///
/// Implementations report an address with no match as
/// [`GeocodeError::NotFound`] and do not retry.
pub trait Geocoder {
    fn locate(
        &self,
        query: &AddressQuery,
    ) -> impl Future<Output = Result<Location, GeocodeError>> + Send;
}
