//! Error taxonomy for the reservation client.
//!
//! Client-side HTTP statuses map to dedicated variants so callers can branch
//! on the failure kind; server-side (5xx) statuses never surface directly —
//! they drive the retry loop and collapse into [`Error::RetriesExhausted`]
//! once the attempt budget is spent.

use thiserror::Error;

/// Unified error type for the reservation client.
#[derive(Debug, Error)]
pub enum Error {
    /// A transport-level failure (DNS, refused connection, timeout) that
    /// survived every attempt in the retry budget.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP 400 — the request was malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// HTTP 401 — the API token was invalid or missing.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// HTTP 403 — the requested slot does not exist.
    #[error("bad slot: {0}")]
    BadSlot(String),

    /// HTTP 404 — the request has not been processed.
    #[error("not processed: {0}")]
    NotProcessed(String),

    /// HTTP 409 — the requested slot is not available.
    #[error("slot unavailable: {0}")]
    SlotUnavailable(String),

    /// HTTP 451 — the client already holds the maximum number of
    /// reservations.
    #[error("reservation limit exceeded: {0}")]
    ReservationLimitExceeded(String),

    /// Any status code outside the mapped set.
    #[error("unexpected HTTP status {status}: {reason}")]
    UnknownStatus { status: u16, reason: String },

    /// Every attempt in the budget was consumed by 5xx responses.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// A 2xx response whose body was not valid JSON.
    #[error("bad response body: {0}")]
    BadResponse(String),

    /// A success payload that did not match the expected shape.
    #[error("payload decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A problem with the service configuration file.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The diagnostic reason attached to a classified failure, if any.
    ///
    /// This is the server's JSON `message` field where one was present,
    /// otherwise the HTTP status line's reason phrase.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::BadRequest(r)
            | Error::InvalidToken(r)
            | Error::BadSlot(r)
            | Error::NotProcessed(r)
            | Error::SlotUnavailable(r)
            | Error::ReservationLimitExceeded(r)
            | Error::BadResponse(r)
            | Error::UnknownStatus { reason: r, .. } => Some(r),
            _ => None,
        }
    }
}

/// Map a terminal (non-2xx, non-5xx) status code to its error kind.
///
/// 5xx codes never reach this table; the dispatch loop retries them.
pub(crate) fn classify_status(status: u16, reason: String) -> Error {
    match status {
        400 => Error::BadRequest(reason),
        401 => Error::InvalidToken(reason),
        403 => Error::BadSlot(reason),
        404 => Error::NotProcessed(reason),
        409 => Error::SlotUnavailable(reason),
        451 => Error::ReservationLimitExceeded(reason),
        _ => Error::UnknownStatus { status, reason },
    }
}
