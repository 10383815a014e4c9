//! The account API client.
//!
//! [`AccountClient`] maps each bank operation to exactly one HTTP call:
//!
//! | method                                              | endpoint                                  |
//! |-----------------------------------------------------|-------------------------------------------|
//! | [`create_dynamic_account`](AccountClient::create_dynamic_account)   | `POST PiPCreateDynamicAccountNumber`      |
//! | [`create_reserved_account`](AccountClient::create_reserved_account) | `POST PiPCreateReservedAccountNumber`     |
//! | [`update_account_name`](AccountClient::update_account_name)         | `POST PiPUpdateAccountName`               |
//! | [`blacklist_account`](AccountClient::blacklist_account)             | `POST PiPBlacklistAccount`                |
//! | [`verify_transaction`](AccountClient::verify_transaction)           | `GET PiPverifyTransaction`                |
//! | [`verify_transaction_with_settlement_id`](AccountClient::verify_transaction_with_settlement_id) | `GET PiPverifyTransaction_settlementid` |
//! | [`repush_transaction`](AccountClient::repush_transaction)           | `POST PiP_RepushTransaction_SettlementId` |
//!
//! ## Error Handling
//!
//! Transport failures, non-2xx statuses and undecodable bodies are returned
//! as [`AccountClientError`]. A refusal by the bank is not an error: it comes
//! back as `Ok` with `success == false`.

use std::fmt::Display;
use std::sync::Arc;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request, Response};
use providus_proto::{
    AccountResponse, BlacklistAccountPayload, DynamicAccountPayload, Outcome,
    RepushTransactionPayload, ReservedAccountPayload, StatusResponse, TransactionResponse,
    UpdateAccountNamePayload,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::auth::BasicAuth;
use crate::config::AccountConfig;
use crate::constants::{
    BLACKLIST_ACCOUNT_PATH, CREATE_DYNAMIC_ACCOUNT_PATH, CREATE_RESERVED_ACCOUNT_PATH,
    DEFAULT_URL_SCHEME, JSON_CONTENT_TYPE, REPUSH_TRANSACTION_PATH, SESSION_ID_PARAM, SETTLEMENT_ID_PARAM,
    UPDATE_ACCOUNT_NAME_PATH, VERIFY_TRANSACTION_PATH, VERIFY_TRANSACTION_SETTLEMENT_PATH,
};
use crate::error::AccountClientError;
use crate::transport::HttpTransport;

/// A client for the Providus Bank account API.
///
/// Immutable once built. Cloning is cheap and clones share the transport.
///
/// # Example
///
/// ```no_run
/// use providus::{AccountClient, AccountConfig};
/// use providus::proto::DynamicAccountPayload;
///
/// # async fn run() -> Result<(), providus::AccountClientError> {
/// let client = AccountClient::new(AccountConfig::new(
///     "https://bank.example/appdevapi/api",
///     "merchant",
///     "secret",
/// ))?;
///
/// let account = client
///     .create_dynamic_account(&DynamicAccountPayload::new("Order 1042"))
///     .await?;
/// if account.success {
///     println!("pay into {}", account.account_number);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AccountClient {
    /// Base URL, normalised to end with a single `/`.
    base_url: Url,
    /// Credentials sent with every request.
    credentials: BasicAuth,
    /// Executes the requests.
    transport: Arc<dyn HttpTransport>,
}

impl AccountClient {
    /// Builds a client from `config`.
    ///
    /// Uses the configured transport, or a `reqwest` client honouring
    /// [`AccountConfig::timeout`] when none is set.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError::UrlParse`] if the base URL is invalid,
    /// [`AccountClientError::Transport`] if the default client cannot be
    /// built, and [`AccountClientError::MissingTransport`] if no transport is
    /// set and the `reqwest` feature is disabled.
    pub fn new(config: AccountConfig) -> Result<Self, AccountClientError> {
        let base_url = parse_base_url(&config.base_url)?;
        let transport = match config.transport {
            Some(transport) => transport,
            None => default_transport(&config)?,
        };
        Ok(Self {
            base_url,
            credentials: config.credentials,
            transport,
        })
    }

    /// Builds a client that sends every request through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError::UrlParse`] if the base URL is invalid.
    pub fn with_transport(
        config: AccountConfig,
        transport: impl HttpTransport + 'static,
    ) -> Result<Self, AccountClientError> {
        Self::new(config.with_transport(transport))
    }

    /// Returns the base URL used by this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the username requests are authenticated as.
    #[must_use]
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Provisions a single-use virtual account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError`] if the request cannot be completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "providus.account.create_dynamic_account",
            skip_all,
            fields(otel.status_code = tracing::field::Empty),
            err
        )
    )]
    pub async fn create_dynamic_account(
        &self,
        payload: &DynamicAccountPayload,
    ) -> Result<AccountResponse, AccountClientError> {
        self.post_json(
            CREATE_DYNAMIC_ACCOUNT_PATH,
            "POST PiPCreateDynamicAccountNumber",
            payload,
        )
        .await
    }

    /// Provisions a permanent virtual account bound to a BVN.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError`] if the request cannot be completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "providus.account.create_reserved_account",
            skip_all,
            fields(otel.status_code = tracing::field::Empty),
            err
        )
    )]
    pub async fn create_reserved_account(
        &self,
        payload: &ReservedAccountPayload,
    ) -> Result<AccountResponse, AccountClientError> {
        self.post_json(
            CREATE_RESERVED_ACCOUNT_PATH,
            "POST PiPCreateReservedAccountNumber",
            payload,
        )
        .await
    }

    /// Changes the display name of a virtual account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError`] if the request cannot be completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "providus.account.update_account_name",
            skip_all,
            fields(otel.status_code = tracing::field::Empty),
            err
        )
    )]
    pub async fn update_account_name(
        &self,
        payload: &UpdateAccountNamePayload,
    ) -> Result<StatusResponse, AccountClientError> {
        self.post_json(UPDATE_ACCOUNT_NAME_PATH, "POST PiPUpdateAccountName", payload)
            .await
    }

    /// Blocks a virtual account from receiving credits, or lifts the block.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError`] if the request cannot be completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "providus.account.blacklist_account",
            skip_all,
            fields(otel.status_code = tracing::field::Empty),
            err
        )
    )]
    pub async fn blacklist_account(
        &self,
        payload: &BlacklistAccountPayload,
    ) -> Result<StatusResponse, AccountClientError> {
        self.post_json(BLACKLIST_ACCOUNT_PATH, "POST PiPBlacklistAccount", payload)
            .await
    }

    /// Looks a credit up by its NIBSS session id.
    ///
    /// An unknown session id is not an error; the returned record then has an
    /// empty `session_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError`] if the request cannot be completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "providus.account.verify_transaction",
            skip_all,
            fields(otel.status_code = tracing::field::Empty),
            err
        )
    )]
    pub async fn verify_transaction(
        &self,
        session_id: &str,
    ) -> Result<TransactionResponse, AccountClientError> {
        self.get_transaction(
            VERIFY_TRANSACTION_PATH,
            "GET PiPverifyTransaction",
            SESSION_ID_PARAM,
            session_id,
        )
        .await
    }

    /// Looks a credit up by the settlement id the bank assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError`] if the request cannot be completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "providus.account.verify_transaction_with_settlement_id",
            skip_all,
            fields(otel.status_code = tracing::field::Empty),
            err
        )
    )]
    pub async fn verify_transaction_with_settlement_id(
        &self,
        settlement_id: &str,
    ) -> Result<TransactionResponse, AccountClientError> {
        self.get_transaction(
            VERIFY_TRANSACTION_SETTLEMENT_PATH,
            "GET PiPverifyTransaction_settlementid",
            SETTLEMENT_ID_PARAM,
            settlement_id,
        )
        .await
    }

    /// Asks the bank to send the settlement notification for a credit again.
    ///
    /// # Errors
    ///
    /// Returns [`AccountClientError`] if the request cannot be completed.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "providus.account.repush_transaction",
            skip_all,
            fields(otel.status_code = tracing::field::Empty),
            err
        )
    )]
    pub async fn repush_transaction(
        &self,
        payload: &RepushTransactionPayload,
    ) -> Result<StatusResponse, AccountClientError> {
        self.post_json(
            REPUSH_TRANSACTION_PATH,
            "POST PiP_RepushTransaction_SettlementId",
            payload,
        )
        .await
    }

    /// Resolves an endpoint path against the base URL.
    fn endpoint(&self, path: &str, context: &'static str) -> Result<Url, AccountClientError> {
        self.base_url
            .join(path)
            .map_err(|source| AccountClientError::UrlParse { context, source })
    }

    /// Generic POST helper: encodes `payload`, sends it and decodes an
    /// outcome-bearing response.
    async fn post_json<T, R>(
        &self,
        path: &str,
        context: &'static str,
        payload: &T,
    ) -> Result<R, AccountClientError>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Outcome,
    {
        let url = self.endpoint(path, context)?;
        let body = serde_json::to_vec(payload)
            .map_err(|source| AccountClientError::Serialize { context, source })?;
        let request = self.build_request(Method::POST, &url, Some(body), context)?;

        let response: R = self.send(request, context).await?;
        record_outcome(context, &response);
        Ok(response)
    }

    /// GET helper shared by both verify endpoints.
    async fn get_transaction(
        &self,
        path: &str,
        context: &'static str,
        param: &str,
        value: &str,
    ) -> Result<TransactionResponse, AccountClientError> {
        let mut url = self.endpoint(path, context)?;
        url.query_pairs_mut().append_pair(param, value);
        let request = self.build_request(Method::GET, &url, None, context)?;

        let response: TransactionResponse = self.send(request, context).await?;
        record_lookup(context, &response);
        Ok(response)
    }

    /// Assembles a request carrying the auth and content negotiation headers.
    fn build_request(
        &self,
        method: Method,
        url: &Url,
        body: Option<Vec<u8>>,
        context: &'static str,
    ) -> Result<Request<Vec<u8>>, AccountClientError> {
        let authorization = self
            .credentials
            .header_value()
            .map_err(|e| AccountClientError::Request {
                context,
                source: e.into(),
            })?;

        let builder = Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, JSON_CONTENT_TYPE);

        let (builder, body) = match body {
            Some(body) => (builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE), body),
            None => (builder, Vec::new()),
        };

        builder
            .body(body)
            .map_err(|source| AccountClientError::Request { context, source })
    }

    /// Executes `request` and decodes the body of a 2xx response.
    async fn send<R>(
        &self,
        request: Request<Vec<u8>>,
        context: &'static str,
    ) -> Result<R, AccountClientError>
    where
        R: DeserializeOwned,
    {
        let result = match self.transport.execute(request).await {
            Ok(response) => decode(&response, context),
            Err(source) => Err(AccountClientError::Transport { context, source }),
        };

        record_result_on_span(&result);

        result
    }
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Parses the base URL and normalises it to a single trailing slash, so
/// endpoint paths are appended to it rather than replacing its last segment.
///
/// A base without a scheme (`bank.example/api`, `localhost:8080`) is taken
/// as a host and gets [`DEFAULT_URL_SCHEME`].
fn parse_base_url(value: &str) -> Result<Url, AccountClientError> {
    let mut normalized = value.trim().trim_end_matches('/').to_owned();
    normalized.push('/');
    let parsed = match Url::parse(&normalized) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url),
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("{DEFAULT_URL_SCHEME}://{normalized}"))
        }
        Err(source) => Err(source),
    };
    parsed.map_err(|source| AccountClientError::UrlParse {
        context: "Failed to parse base url",
        source,
    })
}

#[cfg(feature = "reqwest")]
fn default_transport(
    config: &AccountConfig,
) -> Result<Arc<dyn HttpTransport>, AccountClientError> {
    let client = crate::transport::default_client(config.timeout).map_err(|e| {
        AccountClientError::Transport {
            context: "Failed to build default HTTP client",
            source: Box::new(e),
        }
    })?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "reqwest"))]
const fn default_transport(
    _config: &AccountConfig,
) -> Result<Arc<dyn HttpTransport>, AccountClientError> {
    Err(AccountClientError::MissingTransport)
}

/// Decodes a buffered response, rejecting non-2xx statuses.
fn decode<R: DeserializeOwned>(
    response: &Response<Vec<u8>>,
    context: &'static str,
) -> Result<R, AccountClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AccountClientError::HttpStatus {
            context,
            status,
            body: String::from_utf8_lossy(response.body()).into_owned(),
        });
    }
    serde_json::from_slice(response.body())
        .map_err(|source| AccountClientError::JsonDeserialization { context, source })
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to bank failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

/// Logs a request the bank refused, or accepted with a code other than `"00"`.
#[cfg(feature = "telemetry")]
fn record_outcome<R: Outcome>(context: &'static str, response: &R) {
    if !response.is_successful() {
        tracing::debug!(
            context,
            code = response.response_code(),
            message = response.response_message(),
            "Bank reported an unsuccessful request"
        );
    } else if !response.has_success_code() {
        tracing::debug!(
            context,
            code = response.response_code(),
            message = response.response_message(),
            "Bank accepted the request with a non-standard response code"
        );
    }
}

#[cfg(not(feature = "telemetry"))]
const fn record_outcome<R: Outcome>(_context: &'static str, _response: &R) {}

/// Logs a verify call that matched no transaction.
#[cfg(feature = "telemetry")]
fn record_lookup(context: &'static str, response: &TransactionResponse) {
    if !response.is_found() {
        tracing::debug!(context, "Bank found no matching transaction");
    }
}

#[cfg(not(feature = "telemetry"))]
const fn record_lookup(_context: &'static str, _response: &TransactionResponse) {}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::StatusCode;
    use providus_proto::BlacklistFlag;
    use serde_json::json;
    use std::sync::Mutex;

    use crate::transport::TransportError;

    const CREATE_DYNAMIC_ACCOUNT_AUTH_FAILED: &str =
        include_str!("../testdata/create-dynamic-account-auth-failed.json");
    const CREATE_DYNAMIC_ACCOUNT_SUCCESS: &str =
        include_str!("../testdata/create-dynamic-account-success.json");
    const CREATE_RESERVED_ACCOUNT_FAIL: &str =
        include_str!("../testdata/create-reserved-account-fail.json");
    const CREATE_RESERVED_ACCOUNT_SUCCESS: &str =
        include_str!("../testdata/create-reserved-account-success.json");
    const UPDATE_ACCOUNT_NAME_FAIL: &str =
        include_str!("../testdata/update-account-name-fail.json");
    const UPDATE_ACCOUNT_NAME_SUCCESS: &str =
        include_str!("../testdata/update-account-name-success.json");
    const BLACKLIST_ACCOUNT_FAIL: &str = include_str!("../testdata/blacklist-account-fail.json");
    const BLACKLIST_ACCOUNT_SUCCESS: &str =
        include_str!("../testdata/blacklist-account-success.json");
    const VERIFY_TRANSACTION_FAIL: &str =
        include_str!("../testdata/verify-transaction-fail.json");
    const VERIFY_TRANSACTION_SUCCESS: &str =
        include_str!("../testdata/verify-transaction-success.json");
    const REPUSH_TRANSACTION_FAIL: &str =
        include_str!("../testdata/repush-transaction-fail.json");
    const REPUSH_TRANSACTION_SUCCESS: &str =
        include_str!("../testdata/repush-transaction-success.json");

    /// Answers every request with a canned response and keeps what it was sent.
    #[derive(Debug)]
    struct RecordingTransport {
        status: StatusCode,
        body: &'static str,
        requests: Mutex<Vec<Request<Vec<u8>>>>,
    }

    impl RecordingTransport {
        fn ok(body: &'static str) -> Arc<Self> {
            Self::with_status(StatusCode::OK, body)
        }

        fn with_status(status: StatusCode, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn take_requests(&self) -> Vec<Request<Vec<u8>>> {
            std::mem::take(&mut *self.requests.lock().unwrap())
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn execute(
            &self,
            request: Request<Vec<u8>>,
        ) -> Result<Response<Vec<u8>>, TransportError> {
            self.requests.lock().unwrap().push(request);
            let mut response = Response::new(self.body.as_bytes().to_vec());
            *response.status_mut() = self.status;
            Ok(response)
        }
    }

    /// Fails every request as if the network were down.
    #[derive(Debug)]
    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn execute(
            &self,
            _request: Request<Vec<u8>>,
        ) -> Result<Response<Vec<u8>>, TransportError> {
            Err("connection reset by peer".into())
        }
    }

    fn client_with(transport: &Arc<RecordingTransport>) -> AccountClient {
        AccountClient::with_transport(
            AccountConfig::new("a.com", "john", "pass"),
            Arc::clone(transport),
        )
        .unwrap()
    }

    fn body_json(request: &Request<Vec<u8>>) -> serde_json::Value {
        serde_json::from_slice(request.body()).unwrap()
    }

    #[tokio::test]
    async fn test_create_dynamic_account_auth_failed() {
        let transport = RecordingTransport::ok(CREATE_DYNAMIC_ACCOUNT_AUTH_FAILED);
        let client = client_with(&transport);

        let got = client
            .create_dynamic_account(&DynamicAccountPayload::default())
            .await
            .unwrap();

        assert!(!got.success);
        assert_eq!(got.account_number, "");
        assert_eq!(got.message, "Authentication failed");
    }

    #[tokio::test]
    async fn test_create_dynamic_account_success() {
        let transport = RecordingTransport::ok(CREATE_DYNAMIC_ACCOUNT_SUCCESS);
        let client = client_with(&transport);

        let got = client
            .create_dynamic_account(&DynamicAccountPayload::new("John Doe"))
            .await
            .unwrap();

        assert!(got.success);
        assert_eq!(got.account_number, "9977581536");
        assert_eq!(got.account_name, "John Doe");

        let requests = transport.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method(), Method::POST);
        assert_eq!(
            requests[0].uri(),
            "https://a.com/PiPCreateDynamicAccountNumber"
        );
        assert_eq!(body_json(&requests[0]), json!({ "account_name": "John Doe" }));
    }

    #[tokio::test]
    async fn test_create_reserved_account_success() {
        let transport = RecordingTransport::ok(CREATE_RESERVED_ACCOUNT_SUCCESS);
        let client = client_with(&transport);

        let got = client
            .create_reserved_account(&ReservedAccountPayload::new("Jane Doe", "22222222222"))
            .await
            .unwrap();

        assert!(got.success);
        assert_eq!(got.bvn.as_deref(), Some("22222222222"));

        let requests = transport.take_requests();
        assert_eq!(
            requests[0].uri(),
            "https://a.com/PiPCreateReservedAccountNumber"
        );
        assert_eq!(
            body_json(&requests[0]),
            json!({ "account_name": "Jane Doe", "bvn": "22222222222" })
        );
    }

    #[tokio::test]
    async fn test_create_reserved_account_fail() {
        let transport = RecordingTransport::ok(CREATE_RESERVED_ACCOUNT_FAIL);
        let client = client_with(&transport);

        let got = client
            .create_reserved_account(&ReservedAccountPayload::default())
            .await
            .unwrap();

        assert!(!got.success);
        assert_eq!(got.code, "02");
    }

    #[tokio::test]
    async fn test_update_account_name_fail() {
        let transport = RecordingTransport::ok(UPDATE_ACCOUNT_NAME_FAIL);
        let client = client_with(&transport);

        let got = client
            .update_account_name(&UpdateAccountNamePayload::default())
            .await
            .unwrap();

        assert!(!got.success);
    }

    #[tokio::test]
    async fn test_update_account_name_success() {
        let transport = RecordingTransport::ok(UPDATE_ACCOUNT_NAME_SUCCESS);
        let client = client_with(&transport);

        let got = client
            .update_account_name(&UpdateAccountNamePayload::new("9977581536", "New Name"))
            .await
            .unwrap();

        assert!(got.success);

        let requests = transport.take_requests();
        assert_eq!(requests[0].uri(), "https://a.com/PiPUpdateAccountName");
        assert_eq!(
            body_json(&requests[0]),
            json!({ "account_number": "9977581536", "account_name": "New Name" })
        );
    }

    #[tokio::test]
    async fn test_blacklist_account_fail() {
        let transport = RecordingTransport::ok(BLACKLIST_ACCOUNT_FAIL);
        let client = client_with(&transport);

        let got = client
            .blacklist_account(&BlacklistAccountPayload::default())
            .await
            .unwrap();

        assert!(!got.success);
    }

    #[tokio::test]
    async fn test_blacklist_account_success() {
        let transport = RecordingTransport::ok(BLACKLIST_ACCOUNT_SUCCESS);
        let client = client_with(&transport);

        let payload = BlacklistAccountPayload {
            account_number: "9977581536".to_owned(),
            blacklist_flag: BlacklistFlag::Blacklist,
        };
        let got = client.blacklist_account(&payload).await.unwrap();

        assert!(got.success);

        let requests = transport.take_requests();
        assert_eq!(requests[0].uri(), "https://a.com/PiPBlacklistAccount");
        assert_eq!(
            body_json(&requests[0]),
            json!({ "account_number": "9977581536", "blacklist_flg": 1 })
        );
    }

    #[tokio::test]
    async fn test_verify_transaction_fail() {
        let transport = RecordingTransport::ok(VERIFY_TRANSACTION_FAIL);
        let client = client_with(&transport);

        let got = client.verify_transaction("").await.unwrap();

        assert_eq!(got.session_id, "");
        assert!(!got.is_found());
    }

    #[tokio::test]
    async fn test_verify_transaction_success() {
        let transport = RecordingTransport::ok(VERIFY_TRANSACTION_SUCCESS);
        let client = client_with(&transport);

        let got = client.verify_transaction("123456789").await.unwrap();

        assert_eq!(got.session_id, "123456789");
        assert_eq!(got.currency, "NGN");

        let requests = transport.take_requests();
        assert_eq!(requests[0].method(), Method::GET);
        assert_eq!(
            requests[0].uri(),
            "https://a.com/PiPverifyTransaction?session_id=123456789"
        );
        assert!(requests[0].body().is_empty());
        assert!(requests[0].headers().get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_verify_transaction_with_settlement_id_success() {
        let transport = RecordingTransport::ok(VERIFY_TRANSACTION_SUCCESS);
        let client = client_with(&transport);

        let got = client
            .verify_transaction_with_settlement_id("204210202000000700001")
            .await
            .unwrap();

        assert_eq!(got.settlement_id, "204210202000000700001");

        let requests = transport.take_requests();
        assert_eq!(
            requests[0].uri(),
            "https://a.com/PiPverifyTransaction_settlementid?settlement_id=204210202000000700001"
        );
    }

    #[tokio::test]
    async fn test_verify_transaction_with_settlement_id_fail() {
        let transport = RecordingTransport::ok(VERIFY_TRANSACTION_FAIL);
        let client = client_with(&transport);

        let got = client
            .verify_transaction_with_settlement_id("")
            .await
            .unwrap();

        assert_eq!(got.settlement_id, "");
        assert!(!got.is_found());

        let requests = transport.take_requests();
        assert_eq!(
            requests[0].uri(),
            "https://a.com/PiPverifyTransaction_settlementid?settlement_id="
        );
    }

    #[tokio::test]
    async fn test_repush_transaction_fail() {
        let transport = RecordingTransport::ok(REPUSH_TRANSACTION_FAIL);
        let client = client_with(&transport);

        let got = client
            .repush_transaction(&RepushTransactionPayload::default())
            .await
            .unwrap();

        assert!(!got.success);
    }

    #[tokio::test]
    async fn test_repush_transaction_success() {
        let transport = RecordingTransport::ok(REPUSH_TRANSACTION_SUCCESS);
        let client = client_with(&transport);

        let got = client
            .repush_transaction(&RepushTransactionPayload::new(
                "123456789",
                "204210202000000700001",
            ))
            .await
            .unwrap();

        assert!(got.success);

        let requests = transport.take_requests();
        assert_eq!(
            requests[0].uri(),
            "https://a.com/PiP_RepushTransaction_SettlementId"
        );
        assert_eq!(
            body_json(&requests[0]),
            json!({ "session_id": "123456789", "settlement_id": "204210202000000700001" })
        );
    }

    #[tokio::test]
    async fn test_every_request_carries_basic_auth() {
        let transport = RecordingTransport::ok(UPDATE_ACCOUNT_NAME_SUCCESS);
        let client = client_with(&transport);

        client
            .create_dynamic_account(&DynamicAccountPayload::default())
            .await
            .unwrap();
        client
            .create_reserved_account(&ReservedAccountPayload::default())
            .await
            .unwrap();
        client
            .update_account_name(&UpdateAccountNamePayload::default())
            .await
            .unwrap();
        client
            .blacklist_account(&BlacklistAccountPayload::default())
            .await
            .unwrap();
        client.verify_transaction("1").await.unwrap();
        client.verify_transaction_with_settlement_id("2").await.unwrap();
        client
            .repush_transaction(&RepushTransactionPayload::default())
            .await
            .unwrap();

        let requests = transport.take_requests();
        assert_eq!(requests.len(), 7);
        for request in &requests {
            assert_eq!(request.headers()[AUTHORIZATION], "Basic am9objpwYXNz");
            assert_eq!(request.headers()[ACCEPT], JSON_CONTENT_TYPE);
        }
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let transport = RecordingTransport::ok(UPDATE_ACCOUNT_NAME_SUCCESS);
        for base_url in [
            "https://bank.example/appdevapi/api",
            "https://bank.example/appdevapi/api/",
            "https://bank.example/appdevapi/api//",
        ] {
            let client = AccountClient::with_transport(
                AccountConfig::new(base_url, "john", "pass"),
                Arc::clone(&transport),
            )
            .unwrap();
            client
                .update_account_name(&UpdateAccountNamePayload::default())
                .await
                .unwrap();
        }

        for request in transport.take_requests() {
            assert_eq!(
                request.uri(),
                "https://bank.example/appdevapi/api/PiPUpdateAccountName"
            );
        }
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let transport =
            RecordingTransport::with_status(StatusCode::BAD_GATEWAY, "upstream unavailable");
        let client = client_with(&transport);

        let err = client
            .blacklist_account(&BlacklistAccountPayload::default())
            .await
            .unwrap_err();

        match err {
            AccountClientError::HttpStatus {
                context,
                status,
                body,
            } => {
                assert_eq!(context, "POST PiPBlacklistAccount");
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let transport = RecordingTransport::ok("<html>maintenance</html>");
        let client = client_with(&transport);

        let err = client.verify_transaction("123456789").await.unwrap_err();

        assert!(matches!(
            err,
            AccountClientError::JsonDeserialization { .. }
        ));
        assert_eq!(err.context(), Some("GET PiPverifyTransaction"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let client = AccountClient::with_transport(
            AccountConfig::new("https://a.com", "john", "pass"),
            FailingTransport,
        )
        .unwrap();

        let err = client
            .repush_transaction(&RepushTransactionPayload::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AccountClientError::Transport { .. }));
        assert!(err.to_string().contains("connection reset by peer"));
    }

    #[tokio::test]
    async fn test_host_only_base_url_defaults_to_https() {
        let transport = RecordingTransport::ok(UPDATE_ACCOUNT_NAME_SUCCESS);
        for (base_url, expected) in [
            ("a.com", "https://a.com/PiPUpdateAccountName"),
            ("bank.example/appdevapi/api/", "https://bank.example/appdevapi/api/PiPUpdateAccountName"),
            ("localhost:8080", "https://localhost:8080/PiPUpdateAccountName"),
            ("http://a.com", "http://a.com/PiPUpdateAccountName"),
        ] {
            let client = AccountClient::with_transport(
                AccountConfig::new(base_url, "john", "pass"),
                Arc::clone(&transport),
            )
            .unwrap();
            let got = client
                .update_account_name(&UpdateAccountNamePayload::default())
                .await
                .unwrap();
            assert!(got.success);

            let requests = transport.take_requests();
            assert_eq!(requests[0].uri(), expected);
        }
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = AccountClient::with_transport(
            AccountConfig::new("https://bank example.com", "john", "pass"),
            FailingTransport,
        )
        .unwrap_err();

        assert!(matches!(err, AccountClientError::UrlParse { .. }));
    }

    #[test]
    fn test_debug_hides_password() {
        let client = AccountClient::with_transport(
            AccountConfig::new("https://a.com", "john", "hunter2"),
            FailingTransport,
        )
        .unwrap();

        let rendered = format!("{client:?}");
        assert!(rendered.contains("john"));
        assert!(!rendered.contains("hunter2"));
    }

    #[cfg(feature = "reqwest")]
    #[tokio::test]
    async fn test_default_transport_talks_to_the_bank() {
        use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/PiPCreateDynamicAccountNumber"))
            .and(basic_auth("john", "pass"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "account_name": "John Doe" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(CREATE_DYNAMIC_ACCOUNT_SUCCESS),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/PiPverifyTransaction"))
            .and(basic_auth("john", "pass"))
            .and(query_param("session_id", "123456789"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VERIFY_TRANSACTION_SUCCESS))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AccountClient::new(
            AccountConfig::new(mock_server.uri(), "john", "pass")
                .with_timeout(std::time::Duration::from_secs(5)),
        )
        .unwrap();

        let account = client
            .create_dynamic_account(&DynamicAccountPayload::new("John Doe"))
            .await
            .unwrap();
        assert!(account.success);

        let transaction = client.verify_transaction("123456789").await.unwrap();
        assert_eq!(transaction.session_id, "123456789");
    }

    #[cfg(feature = "reqwest")]
    #[tokio::test]
    async fn test_default_transport_surfaces_rejected_credentials() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let client = AccountClient::new(AccountConfig::new(mock_server.uri(), "john", "wrong"))
            .unwrap();

        let err = client
            .update_account_name(&UpdateAccountNamePayload::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AccountClientError::HttpStatus { status, .. } if status == StatusCode::UNAUTHORIZED
        ));
    }
}
