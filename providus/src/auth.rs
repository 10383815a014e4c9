//! HTTP Basic credentials for the account API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;
use http::header::InvalidHeaderValue;

/// Username/password pair sent as `Authorization: Basic ...` on every request.
///
/// The password never appears in [`Debug`] output.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Builds the `Authorization` header value.
    ///
    /// The value is marked sensitive so `http` and `reqwest` leave it out of
    /// their own debug output.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeaderValue`] if the encoded value is not a valid header.
    /// Base64 output is always ASCII, so in practice this does not fail.
    pub fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
