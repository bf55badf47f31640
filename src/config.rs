//! Client configuration and the named-service file loader.
//!
//! The client itself only needs four scalars (base URL, token, retry budget,
//! inter-retry delay); [`ServicesConfig`] supplies them per named service
//! ("hotel", "band", ...) from a YAML file so credentials and URLs are
//! injected rather than embedded in source.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connection parameters for one reservation service.
///
/// Immutable once handed to [`ReservationClient`](crate::ReservationClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the reservation API, without a trailing endpoint.
    pub base_url: String,
    /// Bearer token attached to every request.
    pub token: String,
    /// Additional attempts after the first; a request makes at most
    /// `max_retries + 1` attempts.
    #[serde(default)]
    pub max_retries: u32,
    /// Constant delay between attempts, in milliseconds. No backoff growth.
    #[serde(default)]
    pub retry_delay_ms: u64,
    /// Per-attempt transport timeout in milliseconds. Distinct from
    /// `retry_delay_ms`: this bounds a single call, the delay spaces calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            max_retries: 0,
            retry_delay_ms: 0,
            timeout_ms: None,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

/// Named-service configuration file.
///
/// ```yaml
/// services:
///   hotel:
///     base_url: https://reservations.example.com/hotel/api
///     token: "..."
///     retries: 3
///     delay_ms: 1000
///   band:
///     base_url: https://reservations.example.com/band/api
///     token: "..."
///     retries: 3
///     delay_ms: 1000
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    services: HashMap<String, ServiceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceEntry {
    base_url: String,
    token: String,
    #[serde(default)]
    retries: u32,
    #[serde(default)]
    delay_ms: u64,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl ServicesConfig {
    /// Load the configuration file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| Error::Configuration(format!("invalid services file: {e}")))
    }

    /// Resolve the [`ClientConfig`] for a named service.
    pub fn service(&self, name: &str) -> Result<ClientConfig> {
        let entry = self.services.get(name).ok_or_else(|| {
            Error::Configuration(format!("service '{name}' not found in configuration"))
        })?;
        Ok(ClientConfig {
            base_url: entry.base_url.clone(),
            token: entry.token.clone(),
            max_retries: entry.retries,
            retry_delay_ms: entry.delay_ms,
            timeout_ms: entry.timeout_ms,
        })
    }

    /// Names of all configured services.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}
