//! Client configuration loaded from the environment and the command line.

use std::env;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the results service base URL.
pub const URL_VAR: &str = "HIPPOD_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "HIPPOD_TIMEOUT_SECS";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how long to talk to the results service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the results service, e.g. `http://hippod:8080/`.
    pub url: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { url: None, timeout: DEFAULT_TIMEOUT }
    }
}

impl ClientConfig {
    /// Reads `HIPPOD_URL` and `HIPPOD_TIMEOUT_SECS` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the timeout is not a positive number.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the timeout is not a positive number.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_VAR).filter(|u| !u.trim().is_empty());
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };
        Ok(Self { url, timeout })
    }

    /// Applies command-line overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `timeout` is not a positive number.
    pub fn with_overrides(
        mut self,
        url: Option<&str>,
        timeout: Option<&str>,
    ) -> ClientResult<Self> {
        if let Some(url) = url {
            self.url = Some(url.to_string());
        }
        if let Some(raw) = timeout {
            self.timeout = parse_timeout(raw)?;
        }
        Ok(self)
    }
}

/// Parses a timeout given in (possibly fractional) seconds.
///
/// # Errors
///
/// Returns a configuration error unless `raw` is a finite number above zero.
pub fn parse_timeout(raw: &str) -> ClientResult<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ClientError::Configuration(format!("invalid timeout {raw:?}")))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ClientError::Configuration(format!(
            "timeout must be a positive number of seconds, not {raw:?}"
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}
