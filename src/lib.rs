//! # goecharger - client for go-e wallboxes
//!
//! Talks to the charger's local HTTP API and translates its terse status
//! payload into a documented, stable structure.
//!
//! ## Architecture
//!
//! - `status`: field mapper from the raw status object to [`NormalizedStatus`]
//! - `client`: status reads and parameter writes with optional read-back
//!   verification
//! - `config`: YAML configuration with environment overrides
//! - `logging`: structured logging and tracing
//! - `error`: crate-wide error type
//!
//! ```no_run
//! # async fn run() -> goecharger::Result<()> {
//! use goecharger::{ChargerClient, ClientConfig};
//!
//! let client = ChargerClient::new(ClientConfig::new("http://192.168.1.20", "TOKEN"))?;
//! if let Some(status) = client.request_status().await?.status() {
//!     println!("{}: {} A", status.car_status, status.charger_max_current);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod status;

// Re-export commonly used types
pub use client::{ChargerClient, ChargerResponse, Sentinel, Verification, WriteOutcome};
pub use config::{ClientConfig, Config};
pub use error::{ChargerError, Result};
pub use status::{NormalizedStatus, RawStatus};
