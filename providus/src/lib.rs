//! Async client for the Providus Bank account API.
//!
//! Provisions virtual accounts, maintains them, and looks up the credits
//! they receive. Every operation is a single authenticated HTTP call.
//!
//! # Modules
//!
//! - [`client`]: [`AccountClient`] and its seven operations
//! - [`config`]: client configuration and TOML-backed settings
//! - [`auth`]: HTTP Basic credentials
//! - [`transport`]: the pluggable HTTP boundary
//! - [`constants`]: endpoint paths and defaults
//! - [`error`]: client error types
//!
//! # Feature Flags
//!
//! - `reqwest` (default): use `reqwest` as the default transport
//! - `telemetry`: emit `tracing` spans for every call
//!
//! # Example
//!
//! ```no_run
//! use providus::{AccountClient, AccountSettings};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = AccountSettings::load_from("providus.toml")?;
//! let client = AccountClient::new(settings.into_config())?;
//!
//! let transaction = client.verify_transaction("100004210202103611234").await?;
//! if transaction.is_found() {
//!     println!("{:?} credited to {}", transaction.settled_amount, transaction.account_number);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod transport;

pub use auth::BasicAuth;
pub use client::AccountClient;
pub use config::{AccountConfig, AccountSettings, ConfigError};
pub use error::AccountClientError;
pub use transport::{HttpTransport, TransportError};

pub use providus_proto as proto;
pub use providus_proto::{
    AccountResponse, BlacklistAccountPayload, BlacklistFlag, DynamicAccountPayload, Outcome,
    RepushTransactionPayload, ReservedAccountPayload, StatusResponse, TransactionResponse,
    UpdateAccountNamePayload,
};
