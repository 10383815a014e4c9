//! Error types for the account client.
//!
//! Only failures to talk to the bank end up here. A request the bank
//! processed but refused (`requestSuccessful: false`) is a normal response.

use http::StatusCode;

use crate::transport::TransportError;

/// Errors that can occur while calling the account API.
///
/// Every variant except [`AccountClientError::MissingTransport`] carries a
/// `context` naming the call, e.g. `"POST PiPBlacklistAccount"`.
#[derive(Debug, thiserror::Error)]
pub enum AccountClientError {
    /// The base URL or an endpoint URL could not be built.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The request payload could not be encoded as JSON.
    #[error("Failed to serialize request body: {context}: {source}")]
    Serialize {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The HTTP request could not be assembled.
    #[error("Failed to build request: {context}: {source}")]
    Request {
        /// Human-readable context.
        context: &'static str,
        /// The underlying `http` error.
        #[source]
        source: http::Error,
    },
    /// The transport failed before a response was received.
    #[error("HTTP error: {context}: {source}")]
    Transport {
        /// Human-readable context.
        context: &'static str,
        /// The error reported by the transport.
        #[source]
        source: TransportError,
    },
    /// The bank answered with a non-2xx status.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body, decoded lossily as UTF-8.
        body: String,
    },
    /// The response body was not the expected JSON.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// No transport was configured and the `reqwest` feature is disabled.
    #[error("no HTTP transport configured")]
    MissingTransport,
}

impl AccountClientError {
    /// Returns the call context, if the variant carries one.
    #[must_use]
    pub const fn context(&self) -> Option<&'static str> {
        match self {
            Self::UrlParse { context, .. }
            | Self::Serialize { context, .. }
            | Self::Request { context, .. }
            | Self::Transport { context, .. }
            | Self::HttpStatus { context, .. }
            | Self::JsonDeserialization { context, .. } => Some(*context),
            Self::MissingTransport => None,
        }
    }
}
