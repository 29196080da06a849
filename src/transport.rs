//! HTTP transport seam.
//!
//! [`HttpTransport`] is the only place the crate touches the network. The
//! production implementation wraps [`reqwest`]; tests substitute a scripted
//! mock. The transport does not interpret HTTP statuses; they come back
//! verbatim for the request executor to classify.

use crate::api::Payload;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A raw HTTP response: status code plus unparsed body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::InvalidResponse(format!("Body is not valid JSON: {}", e)))
    }

    /// Body as UTF-8 text, with invalid sequences replaced.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Best-effort extraction of the service's error message.
    ///
    /// The inference service reports failures as `{"error": "..."}` or
    /// `{"error": ["...", "..."]}`; some endpoints use `{"message": "..."}`.
    /// Returns `None` when the body is not JSON or carries none of those, so
    /// the caller can fall back to a generic message.
    pub fn error_message(&self) -> Option<String> {
        let body: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        match body.get("error") {
            Some(serde_json::Value::String(message)) => return Some(message.clone()),
            Some(serde_json::Value::Array(parts)) => {
                let joined: Vec<&str> = parts.iter().filter_map(|p| p.as_str()).collect();
                if !joined.is_empty() {
                    return Some(joined.join("; "));
                }
            }
            _ => {}
        }
        body.get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
    }
}

/// Minimal HTTP operations the inference client needs.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// concurrently.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a payload to `url` with a bearer token. Text payloads are sent
    /// as JSON, media payloads as raw bytes.
    async fn post(&self, url: &str, api_token: &str, payload: &Payload) -> Result<HttpResponse>;

    /// Unauthenticated GET, used for hub metadata and remote media inputs.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Production transport backed by a shared [`reqwest::Client`].
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport, optionally with a per-request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, url: &str, api_token: &str, payload: &Payload) -> Result<HttpResponse> {
        let request = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_token));

        let request = match payload {
            Payload::Text(text) => request.json(text),
            Payload::Media(bytes) => request.body(bytes.clone()),
        };

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }

    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }
}
