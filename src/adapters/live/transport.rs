//! Live adapter for the `Transport` port using `reqwest`.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use reqwest::Client;

use crate::error::TransportError;
use crate::ports::transport::{Transport, TransportFuture, TransportReceipt};

/// User agent announced to the results service.
pub const USER_AGENT: &str = "Hippodclient/1.0+";

/// Live transport that posts JSON payloads over HTTP.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new HTTP transport.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post(&self, endpoint: &str, payload: Vec<u8>, timeout: Duration) -> TransportFuture<'_> {
        let endpoint = endpoint.to_string();

        Box::pin(async move {
            let response = self
                .client
                .post(&endpoint)
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json")
                .header(USER_AGENT_HEADER, USER_AGENT)
                .timeout(timeout)
                .body(payload)
                .send()
                .await
                .map_err(|e| classify(&e, timeout))?;

            let status = response.status();
            tracing::debug!(%endpoint, status = status.as_u16(), "report posted");
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(TransportError::Status { status: status.as_u16(), body });
            }

            Ok(TransportReceipt { status: status.as_u16() })
        })
    }
}

fn classify(err: &reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Connection(err.to_string())
    }
}
