//! Nominatim geocoding client.

use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::GeocodeError;
use super::{AddressQuery, Geocoder, Location};

/// Default base URL for the public Nominatim service.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim rejects requests without an identifying user agent.
const DEFAULT_USER_AGENT: &str = "transit-planner";

/// Rectangle that results must fall inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl BoundingBox {
    /// The Community of Madrid.
    pub fn madrid() -> Self {
        Self {
            north: 40.55,
            west: -4.0,
            south: 40.25,
            east: -3.3,
        }
    }

    /// Nominatim `viewbox` parameter: `<x1>,<y1>,<x2>,<y2>` (lon/lat).
    fn to_viewbox(self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL for the API
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Restrict results to this area
    pub bounds: Option<BoundingBox>,
}

impl GeocoderConfig {
    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set or clear the bounding box.
    pub fn with_bounds(mut self, bounds: Option<BoundingBox>) -> Self {
        self.bounds = bounds;
        self
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            bounds: Some(BoundingBox::madrid()),
        }
    }
}

/// One search hit. Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    bounds: Option<BoundingBox>,
}

impl NominatimClient {
    /// Create a new client.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bounds: config.bounds,
        })
    }

    /// Query parameters for a structured search.
    fn query_params(&self, query: &AddressQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("street", query.street.clone()),
            ("city", query.city.clone()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
        ];

        if let Some(bounds) = self.bounds {
            params.push(("viewbox", bounds.to_viewbox()));
            params.push(("bounded", "1".to_string()));
        }

        params
    }

    /// Resolve an address to its best match.
    pub async fn search(&self, query: &AddressQuery) -> Result<Location, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let location = parse_search_response(&body, query)?;
        debug!(query = %query, coordinate = %location.coordinate, "geocoded address");

        Ok(location)
    }
}

impl Geocoder for NominatimClient {
    async fn locate(&self, query: &AddressQuery) -> Result<Location, GeocodeError> {
        self.search(query).await
    }
}

/// Take the first hit of a search response.
fn parse_search_response(body: &str, query: &AddressQuery) -> Result<Location, GeocodeError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body).map_err(|e| GeocodeError::Json {
        message: e.to_string(),
    })?;

    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

    let parse = |s: &str| {
        s.parse::<f64>().map_err(|e| GeocodeError::Json {
            message: format!("bad coordinate {s:?}: {e}"),
        })
    };
    let coordinate =
        Coordinate::new(parse(&hit.lat)?, parse(&hit.lon)?).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

    Ok(Location {
        coordinate,
        display_name: hit.display_name,
    })
}
