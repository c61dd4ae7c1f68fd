//! Transport port for delivering serialized reports.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::TransportError;

/// Boxed future type alias used by [`Transport`] to keep the trait dyn-compatible.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TransportReceipt, TransportError>> + Send + 'a>>;

/// Acknowledgement returned for a delivered payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReceipt {
    /// HTTP status code returned by the server.
    pub status: u16,
}

/// Delivers a payload to an endpoint.
///
/// Implementations must report timeouts, connection failures and non-2xx
/// answers as [`TransportError`] values rather than panicking.
pub trait Transport: Send + Sync {
    /// Posts `payload` to `endpoint`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the payload was not accepted.
    fn post(&self, endpoint: &str, payload: Vec<u8>, timeout: Duration) -> TransportFuture<'_>;
}
