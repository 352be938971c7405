//! Custom error types for FinTrack
//!
//! The derivation engine itself is total and never fails; these errors cover
//! the collaborators around it (configuration, storage, validation, export).

use thiserror::Error;

use crate::models::budget::BudgetValidationError;
use crate::models::category::CategoryValidationError;
use crate::models::filter::FilterParseError;
use crate::models::month::MonthParseError;
use crate::models::transaction::TransactionValidationError;

/// The main error type for FinTrack operations
#[derive(Error, Debug)]
pub enum FinTrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FinTrackError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// A transaction ID prefix matched more than one transaction
    pub fn ambiguous_transaction_id(prefix: &str) -> Self {
        Self::Validation(format!("Transaction ID prefix '{}' is ambiguous", prefix))
    }

    /// Budgets only apply to expense categories
    pub fn income_category_budget(name: &str) -> Self {
        Self::Validation(format!(
            "'{}' is an income category and cannot have a budget",
            name
        ))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinTrackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinTrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

// Model-level rejections all surface as validation errors
macro_rules! validation_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for FinTrackError {
                fn from(err: $source) -> Self {
                    Self::Validation(err.to_string())
                }
            }
        )*
    };
}

validation_from!(
    TransactionValidationError,
    CategoryValidationError,
    BudgetValidationError,
    FilterParseError,
    MonthParseError,
);

impl From<csv::Error> for FinTrackError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for FinTrack operations
pub type FinTrackResult<T> = Result<T, FinTrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinTrackError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinTrackError::category_not_found("Groceries");
        assert_eq!(err.to_string(), "Category not found: Groceries");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_domain_validation_helpers() {
        let err = FinTrackError::ambiguous_transaction_id("txn_1");
        assert_eq!(
            err.to_string(),
            "Validation error: Transaction ID prefix 'txn_1' is ambiguous"
        );

        let err = FinTrackError::income_category_budget("Salary");
        assert!(err.is_validation());
        assert!(err.to_string().contains("income category"));
    }

    #[test]
    fn test_duplicate_error() {
        let err = FinTrackError::Duplicate {
            entity_type: "Category",
            identifier: "Pets".into(),
        };
        assert_eq!(err.to_string(), "Category already exists: Pets");
    }

    #[test]
    fn test_model_rejections_become_validation_errors() {
        let err: FinTrackError = TransactionValidationError::EmptyDescription.into();
        assert!(err.is_validation());

        let err: FinTrackError = BudgetValidationError::NonPositiveLimit(0.0).into();
        assert!(err.is_validation());

        let err: FinTrackError = MonthParseError::InvalidMonth(13).into();
        assert_eq!(err.to_string(), "Validation error: Invalid month: 13");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinTrackError = io_err.into();
        assert!(matches!(err, FinTrackError::Io(_)));
    }
}
