//! Wire format types for the Providus Bank account API.
//!
//! This crate defines the request and response records exchanged with the
//! bank's `PiP` collection endpoints. It only depends on `serde`,
//! `serde_json`, `serde_with` and `rust_decimal`, and is shared by the
//! [`providus`](https://docs.rs/providus) client and by anything that needs
//! to handle the same payloads (webhook receivers, fixtures, mocks).
//!
//! # Modules
//!
//! - [`payloads`]: Request bodies (`DynamicAccountPayload`, `RepushTransactionPayload`, etc.)
//! - [`responses`]: Decoded responses (`AccountResponse`, `StatusResponse`, `TransactionResponse`)
//! - [`amount`]: Lenient decoding of monetary amounts

pub mod amount;
pub mod payloads;
pub mod responses;

pub use payloads::{
    BlacklistAccountPayload, BlacklistFlag, DynamicAccountPayload, RepushTransactionPayload,
    ReservedAccountPayload, UpdateAccountNamePayload,
};
pub use responses::{AccountResponse, Outcome, StatusResponse, TransactionResponse};

/// Response code the bank uses for a successful request.
pub const SUCCESS_RESPONSE_CODE: &str = "00";
