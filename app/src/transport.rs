//! Executes core `HttpRequest`s over the network.
//!
//! The `Transport` trait is the seam between the session and real I/O:
//! `UreqTransport` talks HTTP, tests swap in a scripted implementation.

use follower_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

/// Blocking HTTP round-trip. Called from a worker thread, never from the
/// thread that owns the session.
pub trait Transport: Send + Sync {
    /// Non-2xx statuses are returned as data. Failing to get a response is
    /// `ApiError::Transport`; a body that cannot be read as text is
    /// `ApiError::Decode`.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a shared ureq agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn transport_error(err: ureq::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut call = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            call = call.header(name.as_str(), value.as_str());
        }

        let mut response = call.call().map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
