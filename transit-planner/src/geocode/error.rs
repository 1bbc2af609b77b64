//! Geocoding error types.

/// Errors that can occur when resolving an address.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status
    #[error("geocoder error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// No location matches the address
    #[error("address not found: {0}")]
    NotFound(String),
}

impl GeocodeError {
    /// True when the service answered but had no match, as opposed to a
    /// transport or service failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodeError::NotFound(_))
    }
}
