//! The reservation client: dispatch loop, retry policy, and the four public
//! operations.
//!
//! Every operation funnels through [`ReservationClient::send`], which runs an
//! explicit attempt → classify → {retry | fail | succeed} machine. Server-side
//! failures (transport errors and 5xx statuses) consume attempts from the
//! configured budget with a constant delay between attempts; client-side
//! statuses fail immediately with their mapped [`Error`] kind.

use std::fmt;
use std::thread;

use reqwest::blocking::Client as HttpClient;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

use crate::error::classify_status;
use crate::{ClientConfig, Error, Result, Slot, SlotId};

/// Blocking client for one reservation service.
///
/// Stateless beyond its immutable [`ClientConfig`] and the underlying
/// connection pool; separate instances can be used from separate threads for
/// independent services.
pub struct ReservationClient {
    config: ClientConfig,
    http: HttpClient,
}

/// Outcome of a single attempt.
enum Disposition {
    Succeed(serde_json::Value),
    Fail(Error),
    Retry(RetryCause),
}

/// What made an attempt retryable. Kept so the terminal error after an
/// exhausted budget reflects the last failure seen.
enum RetryCause {
    Transport(reqwest::Error),
    ServerError { status: u16, reason: String },
}

impl fmt::Display for RetryCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryCause::Transport(e) => write!(f, "transport failure: {e}"),
            RetryCause::ServerError { status, reason } => {
                write!(f, "server error {status}: {reason}")
            }
        }
    }
}

impl ReservationClient {
    /// Create a client for the service described by `config`.
    ///
    /// The per-attempt timeout from the config is installed on the underlying
    /// HTTP client here; it bounds each individual attempt, while
    /// `retry_delay` only spaces attempts.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, http })
    }

    /// Obtain the list of slots currently available in the system.
    pub fn list_available(&self) -> Result<Vec<Slot>> {
        let payload = self.send(Method::GET, "reservation/available")?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Obtain the list of slots currently held by this client's token.
    pub fn list_held(&self) -> Result<Vec<Slot>> {
        let payload = self.send(Method::GET, "reservation")?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Reserve a slot. Returns the server's record of the reservation.
    pub fn reserve(&self, slot_id: impl Into<SlotId>) -> Result<Slot> {
        let slot_id = slot_id.into();
        let payload = self.send(Method::POST, &format!("reservation/{slot_id}"))?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Release a held slot. Returns the server's acknowledgement record,
    /// whose shape is server-defined.
    pub fn release(&self, slot_id: impl Into<SlotId>) -> Result<serde_json::Value> {
        let slot_id = slot_id.into();
        self.send(Method::DELETE, &format!("reservation/{slot_id}"))
    }

    /// Send one request to the API, applying the retry policy, and return the
    /// decoded JSON payload.
    ///
    /// Makes at most `max_retries + 1` attempts. Transport failures and 5xx
    /// responses consume an attempt and retry after the constant configured
    /// delay; mapped 4xx statuses and unexpected codes fail immediately. If
    /// the budget is exhausted the terminal error reflects the last cause:
    /// [`Error::Network`] for a transport failure, otherwise
    /// [`Error::RetriesExhausted`].
    pub fn send(&self, method: Method, endpoint: &str) -> Result<serde_json::Value> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        );
        let attempts = self.config.max_retries.saturating_add(1);
        debug!(%method, endpoint, attempts, "dispatching request");

        let mut last_cause = None;
        for attempt in 1..=attempts {
            match self.attempt(&method, &url) {
                Disposition::Succeed(payload) => return Ok(payload),
                Disposition::Fail(err) => return Err(err),
                Disposition::Retry(cause) => {
                    warn!(attempt, total = attempts, %cause, "retryable failure");
                    last_cause = Some(cause);
                    // Never sleep after the final attempt.
                    if attempt < attempts {
                        thread::sleep(self.config.retry_delay());
                    }
                }
            }
        }

        match last_cause {
            Some(RetryCause::Transport(e)) => Err(Error::Network(e)),
            _ => Err(Error::RetriesExhausted { attempts }),
        }
    }

    /// Perform one attempt and classify its outcome.
    fn attempt(&self, method: &Method, url: &str) -> Disposition {
        let response = match self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.config.token)
            .send()
        {
            Ok(response) => response,
            Err(e) => return Disposition::Retry(RetryCause::Transport(e)),
        };

        let status = response.status();
        let body = match response.bytes() {
            Ok(body) => body,
            Err(e) => return Disposition::Retry(RetryCause::Transport(e)),
        };

        if status.is_success() {
            match serde_json::from_slice(&body) {
                Ok(payload) => Disposition::Succeed(payload),
                // A 2xx with a non-JSON body. Should not happen, but must
                // not crash the client; surface the reason phrase instead.
                Err(_) => Disposition::Fail(Error::BadResponse(reason_phrase(status))),
            }
        } else if status.is_server_error() {
            Disposition::Retry(RetryCause::ServerError {
                status: status.as_u16(),
                reason: extract_reason(status, &body),
            })
        } else {
            Disposition::Fail(classify_status(
                status.as_u16(),
                extract_reason(status, &body),
            ))
        }
    }
}

/// Obtain the diagnostic reason for a failed response.
///
/// The body may carry a more useful `message` than the status line, so try
/// that first; a body that is not JSON (which can happen when the API really
/// does fail rather than generating a structured error) falls back to the
/// status line's reason phrase.
fn extract_reason(status: StatusCode, body: &[u8]) -> String {
    let text = decode_body(body);
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    reason_phrase(status)
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

/// Decode body bytes as UTF-8, falling back to Latin-1 (where every byte is
/// a valid code point) so a non-UTF-8 body can never panic the client.
fn decode_body(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => body.iter().map(|&b| b as char).collect(),
    }
}
