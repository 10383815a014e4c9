//! Request bodies for the account endpoints.
//!
//! Field names follow the bank's documented snake_case schema and are sent
//! verbatim; no validation happens on this side of the wire.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Body of `POST PiPCreateDynamicAccountNumber`.
///
/// A dynamic account is a short-lived virtual account used to collect a
/// single payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicAccountPayload {
    /// Name shown to the payer when they look the account up.
    pub account_name: String,
}

impl DynamicAccountPayload {
    /// Creates a payload for the given display name.
    #[must_use]
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
        }
    }
}

/// Body of `POST PiPCreateReservedAccountNumber`.
///
/// A reserved account is a permanent virtual account bound to a customer's BVN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedAccountPayload {
    /// Name shown to the payer when they look the account up.
    pub account_name: String,

    /// Bank Verification Number of the customer owning the account.
    pub bvn: String,
}

impl ReservedAccountPayload {
    /// Creates a payload for the given name and BVN.
    #[must_use]
    pub fn new(account_name: impl Into<String>, bvn: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            bvn: bvn.into(),
        }
    }
}

/// Body of `POST PiPUpdateAccountName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAccountNamePayload {
    /// Virtual account to rename.
    pub account_number: String,

    /// New display name.
    pub account_name: String,
}

impl UpdateAccountNamePayload {
    /// Creates a rename payload.
    #[must_use]
    pub fn new(account_number: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            account_name: account_name.into(),
        }
    }
}

/// Whether a blacklist request blocks or releases an account.
///
/// Serialized as the integer the bank expects in `blacklist_flg`:
/// `1` for [`BlacklistFlag::Blacklist`] and `0` for [`BlacklistFlag::Clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlacklistFlag {
    /// Stop the account from receiving further credits.
    #[default]
    Blacklist,
    /// Lift a previous blacklist.
    Clear,
}

impl BlacklistFlag {
    /// Returns the integer sent on the wire.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Blacklist => 1,
            Self::Clear => 0,
        }
    }
}

impl Serialize for BlacklistFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for BlacklistFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            1 => Ok(Self::Blacklist),
            0 => Ok(Self::Clear),
            other => Err(serde::de::Error::custom(format!(
                "blacklist_flg must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl Display for BlacklistFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Body of `POST PiPBlacklistAccount`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistAccountPayload {
    /// Virtual account to block or release.
    pub account_number: String,

    /// Block or release.
    #[serde(rename = "blacklist_flg")]
    pub blacklist_flag: BlacklistFlag,
}

impl BlacklistAccountPayload {
    /// Creates a payload that blacklists `account_number`.
    #[must_use]
    pub fn blacklist(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            blacklist_flag: BlacklistFlag::Blacklist,
        }
    }

    /// Creates a payload that lifts the blacklist on `account_number`.
    #[must_use]
    pub fn clear(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            blacklist_flag: BlacklistFlag::Clear,
        }
    }
}

/// Body of `POST PiP_RepushTransaction_SettlementId`.
///
/// Asks the bank to send the settlement notification for a past credit again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepushTransactionPayload {
    /// NIBSS session id of the original transfer.
    pub session_id: String,

    /// Settlement id the bank assigned to the credit.
    pub settlement_id: String,
}

impl RepushTransactionPayload {
    /// Creates a repush payload.
    #[must_use]
    pub fn new(session_id: impl Into<String>, settlement_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            settlement_id: settlement_id.into(),
        }
    }
}
