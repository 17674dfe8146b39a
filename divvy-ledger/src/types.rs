//! Core types for the group ledger
//!
//! All types are designed for:
//! - JSON interchange with the snapshot document format (serde)
//! - Exact arithmetic (Decimal for money)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Member identifier (opaque, assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// Create new member ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction identifier (opaque, assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create new transaction ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in the shared ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Opaque unique ID (never reused or reassigned)
    pub id: MemberId,

    /// Display name
    pub name: String,
}

impl Member {
    /// Create new member
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Recognized currency code (ISO 4217 subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// Indian Rupee
    INR,
    /// Japanese Yen
    JPY,
    /// Australian Dollar
    AUD,
    /// Canadian Dollar
    CAD,
}

impl Currency {
    /// All recognized currencies, in display order
    pub const ALL: [Currency; 7] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::INR,
        Currency::JPY,
        Currency::AUD,
        Currency::CAD,
    ];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
            Currency::JPY => "¥",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::INR => "Indian Rupee",
            Currency::JPY => "Japanese Yen",
            Currency::AUD => "Australian Dollar",
            Currency::CAD => "Canadian Dollar",
        }
    }

    /// Parse from code string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "JPY" => Some(Currency::JPY),
            "AUD" => Some(Currency::AUD),
            "CAD" => Some(Currency::CAD),
            _ => None,
        }
    }

    /// Format an amount for display, e.g. `$90.00` or `-€12.50`
    ///
    /// Display formatting only; no money math happens here.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        if rounded.is_sign_negative() {
            format!("-{}{:.2}", self.symbol(), -rounded)
        } else {
            format!("{}{:.2}", self.symbol(), rounded)
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One payer's contribution to an expense, or one split recipient's owed
/// portion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Member this share belongs to
    pub user_id: MemberId,

    /// Amount paid (payers) or owed (splits)
    pub amount: Decimal,
}

impl Share {
    /// Create new share
    pub fn new(user_id: MemberId, amount: Decimal) -> Self {
        Self { user_id, amount }
    }
}

/// A ledger transaction
///
/// Tagged union over the two transaction kinds. The tag is the `type` field
/// of the snapshot document, so payers/splits exist only on expenses and
/// from/to only on settlements — enforced statically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Transaction {
    /// Money paid by one or more members, allocated among one or more members
    #[serde(rename = "EXPENSE")]
    Expense {
        /// Opaque unique ID
        id: TransactionId,

        /// What the expense was for
        description: String,

        /// Total expense amount
        amount: Decimal,

        /// When the expense occurred
        date: DateTime<Utc>,

        /// Who paid, and how much each
        payers: Vec<Share>,

        /// Who owes, and how much each
        splits: Vec<Share>,
    },

    /// A direct payment from one member to another
    #[serde(rename = "SETTLEMENT")]
    Settlement {
        /// Opaque unique ID
        id: TransactionId,

        /// Fixed label ("Settlement")
        description: String,

        /// Amount transferred
        amount: Decimal,

        /// When the payment occurred
        date: DateTime<Utc>,

        /// Member who paid
        from: MemberId,

        /// Member who received
        to: MemberId,
    },
}

impl Transaction {
    /// Transaction ID
    pub fn id(&self) -> &TransactionId {
        match self {
            Transaction::Expense { id, .. } => id,
            Transaction::Settlement { id, .. } => id,
        }
    }

    /// Total transaction amount
    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Expense { amount, .. } => *amount,
            Transaction::Settlement { amount, .. } => *amount,
        }
    }

    /// When the transaction occurred
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Transaction::Expense { date, .. } => *date,
            Transaction::Settlement { date, .. } => *date,
        }
    }

    /// Human-readable label
    pub fn description(&self) -> &str {
        match self {
            Transaction::Expense { description, .. } => description,
            Transaction::Settlement { description, .. } => description,
        }
    }

    /// True for the EXPENSE variant
    pub fn is_expense(&self) -> bool {
        matches!(self, Transaction::Expense { .. })
    }

    /// True for the SETTLEMENT variant
    pub fn is_settlement(&self) -> bool {
        matches!(self, Transaction::Settlement { .. })
    }
}
