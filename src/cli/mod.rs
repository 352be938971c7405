//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod config;
pub mod export;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigArgs};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_analytics_command, handle_overview_command, AnalyticsArgs, OverviewArgs};
pub use transaction::{handle_transaction_command, FilterArgs, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::CurrencyCode;
use crate::services::currency::CurrencyConverter;

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(date_str: &str) -> FinTrackResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        FinTrackError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            date_str
        ))
    })
}

/// Parse a date argument or fall back to today
pub(crate) fn parse_date_or_today(
    date_str: Option<&str>,
    today: NaiveDate,
) -> FinTrackResult<NaiveDate> {
    match date_str {
        Some(s) => parse_date(s),
        None => Ok(today),
    }
}

/// Parse a positive amount argument such as "42.50"
pub(crate) fn parse_amount(amount_str: &str) -> FinTrackResult<f64> {
    let cleaned: String = amount_str
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();

    let amount: f64 = cleaned.parse().map_err(|_| {
        FinTrackError::Validation(format!(
            "Invalid amount format: '{}'. Use a number like '42.50'",
            amount_str
        ))
    })?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(FinTrackError::Validation("Please enter a valid amount".into()));
    }

    Ok(amount)
}

/// Resolve a currency argument against the converter's table
pub(crate) fn parse_currency(
    code: &str,
    converter: &CurrencyConverter,
) -> FinTrackResult<CurrencyCode> {
    let code = CurrencyCode::new(code);
    if !converter.is_supported(&code) {
        return Err(FinTrackError::Validation(format!(
            "Unsupported currency: '{}'",
            code
        )));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
        let err = parse_date("03/09/2025").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_date_or_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(parse_date_or_today(None, today).unwrap(), today);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("42.50").unwrap(), 42.5);
        assert_eq!(parse_amount("$1,200").unwrap(), 1200.0);
        assert!(parse_amount("0").unwrap_err().is_validation());
        assert!(parse_amount("-5").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert!(parse_amount("inf").unwrap_err().is_validation());
        assert_eq!(
            parse_amount("0").unwrap_err().to_string(),
            "Validation error: Please enter a valid amount"
        );
    }

    #[test]
    fn test_parse_currency() {
        let converter = CurrencyConverter::default();
        assert_eq!(parse_currency("eur", &converter).unwrap().as_str(), "EUR");
        assert!(parse_currency("XYZ", &converter).unwrap_err().is_validation());
    }
}
