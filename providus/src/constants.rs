//! Endpoint paths, query parameters and defaults for the account API.
//!
//! Paths are relative; they are joined onto the configured base URL so that
//! any prefix it carries (e.g. `/appdevapi/api/`) is kept.

use std::time::Duration;

/// Scheme given to a base URL configured as a bare host.
pub const DEFAULT_URL_SCHEME: &str = "https";

/// `POST`: provision a single-use virtual account.
pub const CREATE_DYNAMIC_ACCOUNT_PATH: &str = "PiPCreateDynamicAccountNumber";

/// `POST`: provision a permanent virtual account bound to a BVN.
pub const CREATE_RESERVED_ACCOUNT_PATH: &str = "PiPCreateReservedAccountNumber";

/// `POST`: change the display name of a virtual account.
pub const UPDATE_ACCOUNT_NAME_PATH: &str = "PiPUpdateAccountName";

/// `POST`: block or release a virtual account.
pub const BLACKLIST_ACCOUNT_PATH: &str = "PiPBlacklistAccount";

/// `GET`: look a credit up by NIBSS session id.
pub const VERIFY_TRANSACTION_PATH: &str = "PiPverifyTransaction";

/// `GET`: look a credit up by settlement id.
pub const VERIFY_TRANSACTION_SETTLEMENT_PATH: &str = "PiPverifyTransaction_settlementid";

/// `POST`: ask the bank to resend a settlement notification.
pub const REPUSH_TRANSACTION_PATH: &str = "PiP_RepushTransaction_SettlementId";

/// Query parameter carrying the session id on [`VERIFY_TRANSACTION_PATH`].
pub const SESSION_ID_PARAM: &str = "session_id";

/// Query parameter carrying the settlement id on [`VERIFY_TRANSACTION_SETTLEMENT_PATH`].
pub const SETTLEMENT_ID_PARAM: &str = "settlement_id";

/// Media type of every request and response body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Request timeout used by the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Redirects the default transport will follow.
pub const MAX_REDIRECTS: usize = 10;
