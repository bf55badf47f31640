//! # reservation-client
//!
//! A small, synchronous client for a remote slot-reservation service exposed
//! over HTTPS. It wraps the service's REST API behind four typed operations
//! and handles the unreliable parts for the caller: transient server errors
//! are retried with a constant inter-attempt delay, and client-side HTTP
//! error codes are translated into a typed [`Error`] the caller can branch
//! on programmatically.
//!
//! ## Key Features
//!
//! - **Typed operations**: [`ReservationClient`] exposes `list_available`,
//!   `list_held`, `reserve`, and `release`
//! - **Bounded retries**: transport failures and 5xx responses consume
//!   attempts from a fixed budget; 4xx responses fail immediately
//! - **Inspectable errors**: every failure carries its kind and the server's
//!   diagnostic reason, never just a printed message
//! - **Injected configuration**: base URL, bearer token, retry budget, and
//!   delays come from [`ClientConfig`], optionally loaded per named service
//!   from a YAML file via [`ServicesConfig`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reservation_client::{ClientConfig, ReservationClient};
//!
//! fn main() -> reservation_client::Result<()> {
//!     let config = ClientConfig::new("https://reservations.example.com/api", "api-token")
//!         .with_max_retries(3)
//!         .with_retry_delay_ms(1000);
//!     let client = ReservationClient::new(config)?;
//!
//!     for slot in client.list_available()? {
//!         println!("available: {}", slot.id);
//!     }
//!     let held = client.reserve(546)?;
//!     println!("reserved: {}", held.id);
//!     client.release(546)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The dispatch loop, retry policy, and the four operations |
//! | [`config`] | Client configuration and the named-service file loader |
//! | [`error`] | Error taxonomy keyed by HTTP status |
//! | [`types`] | Wire types (`Slot`, `SlotId`) |

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ReservationClient;
pub use config::{ClientConfig, ServicesConfig};
pub use error::Error;
pub use types::{Slot, SlotId};

/// Unified result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
