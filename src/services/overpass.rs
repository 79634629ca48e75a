use crate::models::{BuildingFeature, Coordinate};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the Overpass API
#[derive(Debug, Error)]
pub enum OverpassError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Overpass API client
///
/// Issues radius queries for building footprints and parses the element
/// list out of the JSON response. One instance is shared across all
/// requests; reqwest pools connections internally.
pub struct OverpassClient {
    base_url: String,
    /// Server-side query budget, becomes `[timeout:N]` in Overpass QL
    query_timeout_secs: u32,
    request_timeout: Duration,
    client: Client,
}

impl OverpassClient {
    /// Create a new Overpass client
    ///
    /// `request_timeout` bounds the whole HTTP exchange so a caller's
    /// request never hangs; `query_timeout_secs` is the budget the
    /// Overpass server itself is told to honor.
    pub fn new(base_url: String, request_timeout: Duration, query_timeout_secs: u32) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            query_timeout_secs,
            request_timeout,
            client,
        }
    }

    /// Fetch all building features within `radius_m` meters of the
    /// coordinate.
    ///
    /// An empty vector is a successful response meaning the area is clear
    /// at this radius; errors are reserved for transport and parse
    /// failures.
    pub async fn query_buildings(
        &self,
        coordinate: &Coordinate,
        radius_m: u32,
    ) -> Result<Vec<BuildingFeature>, OverpassError> {
        let query = self.build_query(coordinate, radius_m);
        let url = format!(
            "{}?data={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&query)
        );

        tracing::debug!("Querying Overpass: radius {}m around {:.4},{:.4}", radius_m, coordinate.lat, coordinate.lon);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                OverpassError::Timeout(self.request_timeout)
            } else {
                OverpassError::RequestError(e)
            }
        })?;

        if !response.status().is_success() {
            return Err(OverpassError::ApiError(format!(
                "Overpass query failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let features = parse_elements(&json)?;

        tracing::debug!("Overpass returned {} elements at radius {}m", features.len(), radius_m);

        Ok(features)
    }

    /// Build the Overpass QL query for one radius attempt.
    ///
    /// Ways and relations come back with an `out center` point; nodes
    /// carry their own coordinates.
    fn build_query(&self, coordinate: &Coordinate, radius_m: u32) -> String {
        format!(
            "[out:json][timeout:{timeout}];(\
             way[\"building\"](around:{radius},{lat},{lon});\
             relation[\"building\"](around:{radius},{lat},{lon});\
             node[\"building\"](around:{radius},{lat},{lon});\
             );out center;",
            timeout = self.query_timeout_secs,
            radius = radius_m,
            lat = coordinate.lat,
            lon = coordinate.lon,
        )
    }
}

/// Extract the element list from an Overpass response body.
///
/// Elements that fail to deserialize or carry no location are dropped
/// rather than failing the whole response; a missing `elements` array is
/// a malformed response.
fn parse_elements(json: &Value) -> Result<Vec<BuildingFeature>, OverpassError> {
    let elements = json
        .get("elements")
        .and_then(|e| e.as_array())
        .ok_or_else(|| OverpassError::InvalidResponse("Missing elements array".into()))?;

    let features = elements
        .iter()
        .filter_map(|el| serde_json::from_value::<BuildingFeature>(el.clone()).ok())
        .filter(BuildingFeature::has_location)
        .collect();

    Ok(features)
}
