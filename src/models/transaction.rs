//! Transaction model
//!
//! A transaction is an income or expense fact. Its amount is always a
//! positive magnitude; the direction comes from the transaction type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::currency::CurrencyCode;
use super::ids::{CategoryId, TransactionId};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Positive magnitude in `currency`
    pub amount: f64,

    /// Currency the amount was entered in
    #[serde(default)]
    pub currency: CurrencyCode,

    /// Category reference (may dangle; resolved leniently)
    pub category_id: CategoryId,

    /// What the transaction was for
    pub description: String,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Optional free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    /// Create a new transaction in the base currency
    pub fn new(
        kind: TransactionType,
        amount: f64,
        category_id: CategoryId,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            currency: CurrencyCode::default(),
            category_id,
            description: description.into(),
            date,
            notes: None,
        }
    }

    /// Builder-style currency override
    pub fn with_currency(mut self, currency: impl Into<CurrencyCode>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Builder-style notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Amount with sign applied (expenses negative)
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Validate the transaction as it would be submitted
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.category_id.as_str().trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }

        if self.currency.as_str().is_empty() {
            return Err(TransactionValidationError::MissingCurrency);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2} {} - {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.currency,
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    EmptyDescription,
    NonPositiveAmount(f64),
    MissingCategory,
    MissingCurrency,
    UnknownType(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Enter a valid amount greater than 0 (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Please select a category"),
            Self::MissingCurrency => write!(f, "Currency code is required"),
            Self::UnknownType(t) => {
                write!(f, "Unknown transaction type '{}' (expected income or expense)", t)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
