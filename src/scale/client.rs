//! Scale Server HTTP Client
//!
//! Thin client for the scale firmware's JSON-over-HTTP API. Every endpoint
//! is a plain GET; control endpoints carry no response body contract beyond
//! the status code.

use reqwest::Client;
use thiserror::Error;

use super::types::Measurement;

/// Client for the scale server API
pub struct ScaleClient {
    client: Client,
    config: ScaleConfig,
}

/// Configuration for the scale client
#[derive(Debug, Clone)]
pub struct ScaleConfig {
    /// Base URL of the scale server (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

impl ScaleClient {
    /// Create a new scale client with the given configuration
    pub fn new(config: ScaleConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Fetch the current measurements
    pub async fn measurements(&self) -> Result<Measurement, ScaleError> {
        let url = format!("{}/api/measurements", self.config.base_url);

        let response = self.client.get(&url).send().await.map_err(classify)?;

        if response.status().is_success() {
            let measurement = response.json().await.map_err(ScaleError::Request)?;
            Ok(measurement)
        } else {
            Err(ScaleError::Status(response.status().as_u16()))
        }
    }

    /// Zero the scale against whatever currently sits on the platform
    pub async fn tare(&self) -> Result<(), ScaleError> {
        self.send_command("/api/tare").await
    }

    /// Reset the container weight stored on the scale
    pub async fn reset_container(&self) -> Result<(), ScaleError> {
        self.send_command("/api/reset_container").await
    }

    /// Issue a fire-and-forget control GET; 2xx means accepted
    async fn send_command(&self, path: &str) -> Result<(), ScaleError> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self.client.get(&url).send().await.map_err(classify)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ScaleError::Status(response.status().as_u16()))
        }
    }
}

fn classify(e: reqwest::Error) -> ScaleError {
    if e.is_timeout() {
        ScaleError::Timeout
    } else if e.is_connect() {
        ScaleError::Unreachable
    } else {
        ScaleError::Request(e)
    }
}

/// Errors that can occur when talking to the scale server
#[derive(Error, Debug)]
pub enum ScaleError {
    #[error("Scale unreachable")]
    Unreachable,

    #[error("Request timeout")]
    Timeout,

    #[error("Scale returned HTTP {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScaleConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[test]
    fn test_client_keeps_config() {
        let client = ScaleClient::new(ScaleConfig {
            base_url: "http://scale.local:8080".to_string(),
            ..ScaleConfig::default()
        });

        assert_eq!(client.config().base_url, "http://scale.local:8080");
    }

    #[tokio::test]
    async fn test_unreachable_server_classified() {
        // Nothing listens on this port; connect errors must map to Unreachable
        let client = ScaleClient::new(ScaleConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_ms: 1000,
        });

        match client.measurements().await {
            Err(ScaleError::Unreachable) | Err(ScaleError::Timeout) => {}
            other => panic!("expected connection failure, got {:?}", other.map(|_| ())),
        }
    }
}
