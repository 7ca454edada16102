//! Status enums for shop entities.
//!
//! Every enum carries the Bosnian wire token used by the REST contract and
//! stored in the TEXT columns of the pre-existing schema. `as_str`/`FromStr`
//! are the single source of truth for those tokens; serde renames reuse them
//! so JSON and database agree.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for an unrecognized wire token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} token: {token}")]
pub struct UnknownToken {
    /// Which enum the token failed to parse into.
    pub kind: &'static str,
    /// The offending token.
    pub token: String,
}

impl UnknownToken {
    fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_owned(),
        }
    }
}

/// Order lifecycle status.
///
/// Transitions happen only through admin edits; checkout always creates
/// orders as `Processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "u_obradi")]
    Processing,
    #[serde(rename = "poslana")]
    Shipped,
    #[serde(rename = "dostavljena")]
    Delivered,
    #[serde(rename = "otkazana")]
    Cancelled,
}

impl OrderStatus {
    /// The wire/database token for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "u_obradi",
            Self::Shipped => "poslana",
            Self::Delivered => "dostavljena",
            Self::Cancelled => "otkazana",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "u_obradi" => Ok(Self::Processing),
            "poslana" => Ok(Self::Shipped),
            "dostavljena" => Ok(Self::Delivered),
            "otkazana" => Ok(Self::Cancelled),
            other => Err(UnknownToken::new("order status", other)),
        }
    }
}

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "pouzece")]
    CashOnDelivery,
    #[serde(rename = "virman")]
    BankTransfer,
    #[serde(rename = "kartica")]
    Card,
}

impl PaymentMethod {
    /// The wire/database token for this payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "pouzece",
            Self::BankTransfer => "virman",
            Self::Card => "kartica",
        }
    }

    /// Status of the transaction created at checkout for this method.
    ///
    /// Cash on delivery is collected later, so its transaction starts out
    /// pending; everything else is recorded as already paid.
    #[must_use]
    pub const fn initial_transaction_status(self) -> TransactionStatus {
        match self {
            Self::CashOnDelivery => TransactionStatus::Pending,
            Self::BankTransfer | Self::Card => TransactionStatus::Paid,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pouzece" => Ok(Self::CashOnDelivery),
            "virman" => Ok(Self::BankTransfer),
            "kartica" => Ok(Self::Card),
            other => Err(UnknownToken::new("payment method", other)),
        }
    }
}

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryType {
    #[default]
    #[serde(rename = "standardna")]
    Standard,
    #[serde(rename = "brza")]
    Express,
}

impl DeliveryType {
    /// The wire/database token for this delivery type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standardna",
            Self::Express => "brza",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standardna" => Ok(Self::Standard),
            "brza" => Ok(Self::Express),
            other => Err(UnknownToken::new("delivery type", other)),
        }
    }
}

/// Payment record status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "na_cekanju")]
    Pending,
    #[serde(rename = "placena")]
    Paid,
    #[serde(rename = "neuspjesna")]
    Failed,
}

impl TransactionStatus {
    /// The wire/database token for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "na_cekanju",
            Self::Paid => "placena",
            Self::Failed => "neuspjesna",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "na_cekanju" => Ok(Self::Pending),
            "placena" => Ok(Self::Paid),
            "neuspjesna" => Ok(Self::Failed),
            other => Err(UnknownToken::new("transaction status", other)),
        }
    }
}

/// Account kind of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccountKind {
    /// Retail customer.
    #[default]
    #[serde(rename = "fizicko_lice")]
    Individual,
    /// Company account with tax fields.
    #[serde(rename = "pravno_lice")]
    Business,
    /// Back-office administrator.
    #[serde(rename = "admin")]
    Admin,
}

impl AccountKind {
    /// The wire/database token for this account kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "fizicko_lice",
            Self::Business => "pravno_lice",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fizicko_lice" => Ok(Self::Individual),
            "pravno_lice" => Ok(Self::Business),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownToken::new("account kind", other)),
        }
    }
}
