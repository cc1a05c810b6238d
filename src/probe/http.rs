//! HTTP transport implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;

use super::TransportError;

/// Total per-request budget, including response headers.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Budget for establishing the connection (DNS + TCP + TLS).
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const REDIRECT_CAP: usize = 5;

/// The injected HTTP capability: perform one authenticated GET with a
/// timeout and return the status code, or a transport error.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn get(&self, url: &str, api_key: &str) -> Result<u16, TransportError>;
}

/// Production transport backed by a shared reqwest client.
///
/// The client pools connections and is safe for concurrent use across
/// probes. TLS verification stays on.
#[derive(Clone)]
pub struct PulseClient {
    client: reqwest::Client,
}

impl PulseClient {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(Policy::limited(REDIRECT_CAP))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSender for PulseClient {
    async fn get(&self, url: &str, api_key: &str) -> Result<u16, TransportError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header("apikey", api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(REQUEST_TIMEOUT)
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        Ok(response.status().as_u16())
    }
}
