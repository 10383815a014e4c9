//! The HTTP boundary of the account client.
//!
//! [`HttpTransport`] is the only seam between the client and the network:
//! the client hands it a fully built [`http::Request`] and gets an
//! [`http::Response`] back. Anything that can do that can stand in for the
//! network, which is how the tests run without one.
//!
//! With the `reqwest` feature (on by default) both [`reqwest::Client`] and
//! [`reqwest_middleware::ClientWithMiddleware`] implement the trait, so a
//! caller can plug in their own middleware stack.

use std::sync::Arc;

use async_trait::async_trait;
use http::{Request, Response};

/// Error reported by a transport. Opaque to the client, which wraps it in
/// [`AccountClientError::Transport`](crate::AccountClientError::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes a single HTTP request.
///
/// Implementations must be safe to share between tasks. They should not
/// interpret the status code; non-2xx handling belongs to the client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the complete response.
    async fn execute(&self, request: Request<Vec<u8>>)
    -> Result<Response<Vec<u8>>, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, TransportError> {
        (**self).execute(request).await
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_support::default_client;

#[cfg(feature = "reqwest")]
mod reqwest_support {
    use std::time::Duration;

    use async_trait::async_trait;
    use http::{Request, Response};

    use super::{HttpTransport, TransportError};
    use crate::constants::MAX_REDIRECTS;

    /// Builds the [`reqwest::Client`] used when no transport is configured.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the TLS backend cannot be initialised.
    pub fn default_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
    }

    #[async_trait]
    impl HttpTransport for reqwest::Client {
        async fn execute(
            &self,
            request: Request<Vec<u8>>,
        ) -> Result<Response<Vec<u8>>, TransportError> {
            let request = reqwest::Request::try_from(request)?;
            let response = Self::execute(self, request).await?;
            into_http_response(response).await
        }
    }

    #[async_trait]
    impl HttpTransport for reqwest_middleware::ClientWithMiddleware {
        async fn execute(
            &self,
            request: Request<Vec<u8>>,
        ) -> Result<Response<Vec<u8>>, TransportError> {
            let request = reqwest::Request::try_from(request)?;
            let response = Self::execute(self, request).await?;
            into_http_response(response).await
        }
    }

    /// Buffers a reqwest response into an [`http::Response`].
    async fn into_http_response(
        response: reqwest::Response,
    ) -> Result<Response<Vec<u8>>, TransportError> {
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut converted = Response::new(body.to_vec());
        *converted.status_mut() = status;
        *converted.version_mut() = version;
        *converted.headers_mut() = headers;
        Ok(converted)
    }
}
