//! Client configuration.
//!
//! [`AccountConfig`] is the builder handed to
//! [`AccountClient::new`](crate::AccountClient::new). [`AccountSettings`] is
//! its serializable counterpart for applications that keep credentials in a
//! TOML file:
//!
//! ```toml
//! base_url = "https://api.providusbank.example/appdevapi/api"
//! username = "merchant"
//! password = "${PROVIDUS_PASSWORD}"
//! timeout_secs = 20
//! ```
//!
//! `$VAR` and `${VAR}` references are expanded from the process environment
//! when the file is loaded. Nothing is read from the environment unless the
//! caller loads settings.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::BasicAuth;
use crate::constants::DEFAULT_TIMEOUT;
use crate::transport::HttpTransport;

/// Configuration for [`AccountClient`](crate::AccountClient).
pub struct AccountConfig {
    /// Base URL of the API. Endpoint paths are resolved relative to it.
    pub base_url: String,

    /// Basic auth credentials sent with every request.
    pub credentials: BasicAuth,

    /// Request timeout for the default transport. Ignored when a custom
    /// transport is supplied; that transport owns its own timeouts.
    pub timeout: Duration,

    /// Optional transport. If `None`, a `reqwest` client is built.
    pub transport: Option<Arc<dyn HttpTransport>>,
}

impl AccountConfig {
    /// Creates a config for the given base URL and credentials.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: BasicAuth::new(username, password),
            timeout: DEFAULT_TIMEOUT,
            transport: None,
        }
    }

    /// Sets the request timeout of the default transport.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Routes every request through `transport` instead of the default one.
    #[must_use]
    pub fn with_transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}

/// Errors that can occur while loading [`AccountSettings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The settings are not valid TOML or miss a required key.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// File-backed client settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    /// Base URL of the API.
    pub base_url: String,

    /// Basic auth username.
    pub username: String,

    /// Basic auth password.
    pub password: String,

    /// Request timeout in seconds (default: 30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl AccountSettings {
    /// Loads settings from a TOML file, expanding environment references.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from TOML text, expanding environment references.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid settings.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(content);
        Ok(toml::from_str(&expanded)?)
    }

    /// Converts the settings into a client config using the default transport.
    #[must_use]
    pub fn into_config(self) -> AccountConfig {
        let config = AccountConfig::new(self.base_url, self.username, self.password);
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

impl std::fmt::Debug for AccountSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSettings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Expands `$VAR` and `${VAR}` patterns in a string from environment variables.
///
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced {
                chars.next();
                if c == '}' {
                    closed = true;
                    break;
                }
            } else if c.is_ascii_alphanumeric() || c == '_' {
                chars.next();
            } else {
                break;
            }
            var_name.push(c);
        }

        match lookup(&var_name) {
            Some(value) if !var_name.is_empty() && (closed || !braced) => result.push_str(&value),
            _ => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "PROVIDUS_USER" => Some("merchant".to_owned()),
            "PROVIDUS_PASSWORD" => Some("s3cret".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn expands_plain_and_braced_references() {
        assert_eq!(
            expand_with("user=$PROVIDUS_USER pass=${PROVIDUS_PASSWORD}!", lookup),
            "user=merchant pass=s3cret!"
        );
    }

    #[test]
    fn leaves_unresolved_references_alone() {
        assert_eq!(expand_with("$MISSING ${MISSING} $ ${", lookup), "$MISSING ${MISSING} $ ${");
    }

    #[test]
    fn parses_settings_into_config() {
        let settings = AccountSettings::from_toml_str(
            r#"
            base_url = "https://bank.example/appdevapi/api"
            username = "merchant"
            password = "s3cret"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.timeout_secs, Some(5));
        assert!(!format!("{settings:?}").contains("s3cret"));

        let config = settings.into_config();
        assert_eq!(config.base_url, "https://bank.example/appdevapi/api");
        assert_eq!(config.credentials.username(), "merchant");
        assert_eq!(config.credentials.password(), "s3cret");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.transport.is_none());
    }

    #[test]
    fn missing_keys_are_parse_errors() {
        let err = AccountSettings::from_toml_str(r#"base_url = "https://bank.example""#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AccountSettings::load_from("/nonexistent/providus.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn default_timeout_applies_without_override() {
        let config = AccountConfig::new("https://bank.example", "u", "p");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
