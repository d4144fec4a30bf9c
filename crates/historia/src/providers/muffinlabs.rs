//! Muffin Labs history provider
//!
//! Implementation of `HistoryLookupClient` for the "Today in History" API
//! (<https://history.muffinlabs.com/>).

use crate::config::lookup::DEFAULT_SERVER;
use crate::data::types::HistoryData;
use crate::error::Result;
use crate::network::HttpClient;

use super::traits::HistoryLookupClient;

use log::debug;
use serde::Deserialize;

// =============================================================================
// Internal API response types (serde)
// =============================================================================

/// Response envelope: `{"date": ..., "url": ..., "data": {...}}`
#[derive(Debug, Deserialize)]
struct DateResponse {
    #[serde(default)]
    data: HistoryData,
}

// =============================================================================
// MuffinLabsClient
// =============================================================================

/// Muffin Labs "Today in History" client
pub struct MuffinLabsClient {
    client: HttpClient,
    base_url: String,
}

impl MuffinLabsClient {
    /// Create a client using the default server
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_SERVER)
    }

    /// Create a client with a custom base URL (for testing or mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url: String = base_url.into();
        Ok(Self {
            client: HttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a full API URL from an endpoint path
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl HistoryLookupClient for MuffinLabsClient {
    fn name(&self) -> &'static str {
        "Muffin Labs"
    }

    fn fetch(&self, month: &str, day: &str) -> Result<HistoryData> {
        let url = self.url(&format!("/date/{month}/{day}"));
        let response: DateResponse = self.client.get_json(&url)?;
        debug!(
            "lookup {month}/{day}: events={} deaths={} births={}",
            response.data.events.len(),
            response.data.deaths.len(),
            response.data.births.len()
        );
        Ok(response.data)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{Category, HistoryEvent};

    const CHRISTMAS_BODY: &str = r#"{
        "date": "December 25",
        "url": "https://wikipedia.org/wiki/December_25",
        "data": {
            "Events": [
                {"year": "800", "text": "Charlemagne crowned", "html": "...", "links": []}
            ],
            "Births": [],
            "Deaths": []
        }
    }"#;

    #[test]
    fn test_provider_name() {
        let provider = MuffinLabsClient::new().unwrap();
        assert_eq!(provider.name(), "Muffin Labs");
    }

    #[test]
    fn test_provider_default_base_url() {
        let provider = MuffinLabsClient::new().unwrap();
        assert_eq!(provider.base_url, "https://history.muffinlabs.com");
    }

    #[test]
    fn test_provider_url_building() {
        let provider = MuffinLabsClient::with_base_url("https://api.example.com/").unwrap();
        assert_eq!(
            provider.url("/date/12/25"),
            "https://api.example.com/date/12/25"
        );
    }

    #[test]
    fn test_fetch_parses_payload() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/date/12/25")
            .with_header("content-type", "application/json")
            .with_body(CHRISTMAS_BODY)
            .create();

        let provider = MuffinLabsClient::with_base_url(server.url()).unwrap();
        let data = provider.fetch("12", "25").unwrap();

        mock.assert();
        assert_eq!(
            data.for_category(&Category::Events),
            [HistoryEvent::new("800", "Charlemagne crowned")]
        );
        assert!(data.deaths.is_empty());
        assert!(data.births.is_empty());
    }

    #[test]
    fn test_fetch_passes_segments_unpadded() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/date/6/5")
            .with_body(r#"{"data": {}}"#)
            .create();

        let provider = MuffinLabsClient::with_base_url(server.url()).unwrap();
        let data = provider.fetch("6", "5").unwrap();

        mock.assert();
        assert!(data.is_empty());
    }

    #[test]
    fn test_fetch_missing_data_is_empty() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/date/1/1").with_body("{}").create();

        let provider = MuffinLabsClient::with_base_url(server.url()).unwrap();
        assert!(provider.fetch("1", "1").unwrap().is_empty());
    }

    #[test]
    fn test_fetch_server_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/date/12/25")
            .with_status(500)
            .with_body(CHRISTMAS_BODY)
            .create();

        let provider = MuffinLabsClient::with_base_url(server.url()).unwrap();
        assert!(provider.fetch("12", "25").is_err());
    }

    #[test]
    fn test_fetch_unreachable_server() {
        let provider = MuffinLabsClient::with_base_url("http://invalid.invalid.invalid").unwrap();
        assert!(provider.fetch("12", "25").is_err());
    }

    // ---- Integration tests (require network, marked #[ignore]) ----

    #[test]
    #[ignore]
    fn test_integration_fetch_christmas() {
        let provider = MuffinLabsClient::new().unwrap();
        let data = provider.fetch("12", "25").unwrap();
        assert!(!data.events.is_empty());
    }
}
