//! HTTP client for the occurrence API.

use async_trait::async_trait;
use sentinela_core::{NewOccurrence, Occurrence};
use tracing::info;

use crate::{OccurrenceApi, SyncError};

const LIST_PATH: &str = "/api/ocorrencias/list/";
const CREATE_PATH: &str = "/api/ocorrencia/";

/// Where the occurrence API lives and who is reporting.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as `user_id` on every created record.
    pub user_id: i64,
}

impl ClientConfig {
    /// `base_url` should be like `http://localhost:8000`; a trailing slash is dropped.
    pub fn new(base_url: impl Into<String>, user_id: i64) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
        }
    }
}

/// HTTP client for the occurrence list and create endpoints.
pub struct OccurrenceClient {
    client: reqwest::Client,
    base_url: String,
}

impl OccurrenceClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SyncError::Server {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl OccurrenceApi for OccurrenceClient {
    async fn list_occurrences(&self) -> Result<Vec<Occurrence>, SyncError> {
        let url = self.url(LIST_PATH);
        info!(url = %url, "fetching occurrences");
        let resp = check_status(self.client.get(&url).send().await?).await?;
        let occurrences: Vec<Occurrence> = resp.json().await?;
        info!(count = occurrences.len(), "fetched occurrences");
        Ok(occurrences)
    }

    async fn create_occurrence(&self, occurrence: &NewOccurrence) -> Result<(), SyncError> {
        let url = self.url(CREATE_PATH);
        info!(url = %url, tipo = %occurrence.tipo, "creating occurrence");
        check_status(self.client.post(&url).json(occurrence).send().await?).await?;
        info!("occurrence created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/", 1);
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn endpoint_urls() {
        let client = OccurrenceClient::new(&ClientConfig::new("http://10.0.2.2:8000/", 1));
        assert_eq!(
            client.url(LIST_PATH),
            "http://10.0.2.2:8000/api/ocorrencias/list/"
        );
        assert_eq!(client.url(CREATE_PATH), "http://10.0.2.2:8000/api/ocorrencia/");
    }

    #[test]
    fn server_error_message() {
        let err = SyncError::Server {
            status: 400,
            body: "{\"tipo\":[\"required\"]}".into(),
        };
        assert_eq!(err.to_string(), "server returned 400: {\"tipo\":[\"required\"]}");
    }
}
