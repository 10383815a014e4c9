//! Response records returned by the account endpoints.
//!
//! The bank signals business failures (bad credentials, unknown account,
//! duplicate request) through `requestSuccessful: false` inside an otherwise
//! normal body. Those are decoded like any other response; it is up to the
//! caller to branch on [`Outcome::is_successful`].
//!
//! String fields the bank leaves out or sends as `null` decode to `""`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

/// Common view over responses that carry the bank's outcome envelope.
pub trait Outcome {
    /// The `requestSuccessful` flag.
    fn is_successful(&self) -> bool;

    /// The bank's `responseCode` (`"00"` on success).
    fn response_code(&self) -> &str;

    /// The bank's human-readable `responseMessage`.
    fn response_message(&self) -> &str;

    /// Returns `true` if the bank answered with its plain success code.
    fn has_success_code(&self) -> bool {
        self.response_code() == crate::SUCCESS_RESPONSE_CODE
    }
}

/// Response to account creation (dynamic and reserved).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Whether the bank accepted the request.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "requestSuccessful", default)]
    pub success: bool,

    /// Human-readable outcome, e.g. `"Reserved Account Generated Successfully"`.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "responseMessage", default)]
    pub message: String,

    /// Bank response code.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "responseCode", default)]
    pub code: String,

    /// The provisioned virtual account number. Empty on failure.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub account_number: String,

    /// Display name registered on the account.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub account_name: String,

    /// BVN the account is bound to. Only present for reserved accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bvn: Option<String>,
}

impl Outcome for AccountResponse {
    fn is_successful(&self) -> bool {
        self.success
    }

    fn response_code(&self) -> &str {
        &self.code
    }

    fn response_message(&self) -> &str {
        &self.message
    }
}

/// Bare outcome envelope, returned by name updates, blacklisting and repush.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Whether the bank accepted the request.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "requestSuccessful", default)]
    pub success: bool,

    /// Human-readable outcome.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "responseMessage", default)]
    pub message: String,

    /// Bank response code.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "responseCode", default)]
    pub code: String,
}

impl Outcome for StatusResponse {
    fn is_successful(&self) -> bool {
        self.success
    }

    fn response_code(&self) -> &str {
        &self.code
    }

    fn response_message(&self) -> &str {
        &self.message
    }
}

/// A credit to a virtual account, as returned by both verify endpoints.
///
/// When the bank cannot find the transaction it still answers with this
/// shape, but every identifier is empty. Use [`TransactionResponse::is_found`]
/// to tell the two apart.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// NIBSS session id of the inbound transfer.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub session_id: String,

    /// Settlement id the bank assigned to the credit.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub settlement_id: String,

    /// Virtual account that was credited.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub account_number: String,

    /// Narration supplied by the sender.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub tran_remarks: String,

    /// Amount the sender transferred.
    #[serde(default, with = "crate::amount")]
    pub transaction_amount: Option<Decimal>,

    /// Amount credited after fees.
    #[serde(default, with = "crate::amount")]
    pub settled_amount: Option<Decimal>,

    /// Fee charged by the bank.
    #[serde(default, with = "crate::amount")]
    pub fee_amount: Option<Decimal>,

    /// VAT charged on the fee.
    #[serde(default, with = "crate::amount")]
    pub vat_amount: Option<Decimal>,

    /// ISO currency code, normally `NGN`.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub currency: String,

    /// Reference of the originating transfer.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub initiation_tran_ref: String,

    /// Sender's account number.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub source_account_number: String,

    /// Sender's account name.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub source_account_name: String,

    /// Sender's bank.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub source_bank_name: String,

    /// Channel the transfer came through.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub channel_id: String,

    /// Bank-local timestamp, e.g. `2021-02-02 10:36:06.000`.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub tran_date_time: String,
}

impl TransactionResponse {
    /// Returns `true` if the bank recognised the transaction.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.session_id.is_empty() || !self.settlement_id.is_empty()
    }
}
