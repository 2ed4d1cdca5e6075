//! Place text-search client used to geocode typed addresses.
//!
//! Queries are biased toward a fixed circle around the service area. Only
//! coordinates are read from the response.

use async_trait::async_trait;
use sentinela_core::Coordinate;
use sentinela_core::shell::INITIAL_REGION;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{PlaceLookup, SyncError};

pub const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
pub const DEFAULT_RADIUS_M: u32 = 5_000;

#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub endpoint: String,
    /// Centre of the search bias circle.
    pub center: Coordinate,
    pub radius_m: u32,
}

impl PlacesConfig {
    /// Bias searches toward the map's starting region.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: TEXT_SEARCH_URL.to_string(),
            center: INITIAL_REGION.center,
            radius_m: DEFAULT_RADIUS_M,
        }
    }
}

pub struct PlacesClient {
    client: reqwest::Client,
    config: PlacesConfig,
}

impl PlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self, SyncError> {
        if config.api_key.trim().is_empty() {
            return Err(SyncError::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    fn query_params(&self, query: &str) -> [(&'static str, String); 4] {
        [
            ("query", query.to_string()),
            (
                "location",
                format!(
                    "{},{}",
                    self.config.center.latitude, self.config.center.longitude
                ),
            ),
            ("radius", self.config.radius_m.to_string()),
            ("key", self.config.api_key.clone()),
        ]
    }
}

#[derive(Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct PlaceResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Extract match coordinates from a text-search response body.
///
/// `ZERO_RESULTS` is an empty match list, not an error.
pub fn parse_text_search(body: &str) -> Result<Vec<Coordinate>, SyncError> {
    let response: TextSearchResponse = serde_json::from_str(body)?;
    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" | "" => Ok(response
            .results
            .into_iter()
            .map(|r| Coordinate::new(r.geometry.location.lat, r.geometry.location.lng))
            .collect()),
        status => Err(SyncError::PlaceSearch {
            status: status.to_string(),
            message: response.error_message.unwrap_or_default(),
        }),
    }
}

#[async_trait]
impl PlaceLookup for PlacesClient {
    async fn text_search(&self, query: &str) -> Result<Vec<Coordinate>, SyncError> {
        debug!(query, "place text search");
        let resp = self
            .client
            .get(&self.config.endpoint)
            .query(&self.query_params(query))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let body = resp.text().await?;
        let matches = parse_text_search(&body)?;
        info!(query, count = matches.len(), "place search complete");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_in_order() {
        let body = r#"{
            "results": [
                {"name": "Av. Fernandes Lima", "geometry": {"location": {"lat": -9.6401, "lng": -35.7301}}},
                {"name": "Fernandes Lima II", "geometry": {"location": {"lat": -9.6200, "lng": -35.7400}}}
            ],
            "status": "OK"
        }"#;
        let matches = parse_text_search(body).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], Coordinate::new(-9.6401, -35.7301));
    }

    #[test]
    fn zero_results_is_empty() {
        let matches = parse_text_search(r#"{"results": [], "status": "ZERO_RESULTS"}"#).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn denied_status_is_error() {
        let body = r#"{"results": [], "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#;
        match parse_text_search(body) {
            Err(SyncError::PlaceSearch { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert!(message.contains("API key"));
            }
            other => panic!("expected PlaceSearch error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_json_error() {
        assert!(matches!(
            parse_text_search("<html>"),
            Err(SyncError::Json(_))
        ));
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(
            PlacesClient::new(PlacesConfig::new("  ")),
            Err(SyncError::MissingApiKey)
        ));
    }

    #[test]
    fn query_is_biased_to_service_area() {
        let client = PlacesClient::new(PlacesConfig::new("k3y")).unwrap();
        let params = client.query_params("Rua da Praia");
        assert_eq!(params[0], ("query", "Rua da Praia".to_string()));
        assert_eq!(params[1], ("location", "-9.6498,-35.7089".to_string()));
        assert_eq!(params[2], ("radius", "5000".to_string()));
        assert_eq!(params[3], ("key", "k3y".to_string()));
    }
}
