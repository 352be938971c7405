//! Budget CLI commands
//!
//! Implements CLI commands for setting per-category spending limits and
//! showing a month's status against them.

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_amount;
use crate::cache::DerivationCache;
use crate::config::settings::Settings;
use crate::error::FinTrackResult;
use crate::models::{BudgetPeriod, Month};
use crate::services::{BudgetService, CategoryService};
use crate::storage::{self, Storage};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the spending limit for an expense category
    Set {
        /// Category name or ID
        category: String,
        /// Limit amount (e.g., "500" or "500.00")
        amount: String,
        /// Budget period (monthly or weekly)
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// Remove a category's spending limit
    Remove {
        /// Category name or ID
        category: String,
    },

    /// Show a month's spending against every limit
    Status {
        /// Month to evaluate as YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cache: &DerivationCache,
    today: NaiveDate,
    cmd: BudgetCommands,
) -> FinTrackResult<()> {
    let service = BudgetService::new(storage);
    let category_service = CategoryService::new(storage);

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
        } => {
            let category = category_service.require(&category)?;
            let limit = parse_amount(&amount)?;
            let period = period.parse::<BudgetPeriod>()?;

            let entry = service.set(&category.id, limit, period)?;
            println!(
                "Budget for {}: {} ({})",
                category.name,
                cache.converter().format(entry.limit, &settings.base_currency),
                entry.period
            );
        }

        BudgetCommands::Remove { category } => {
            let category = category_service.require(&category)?;
            service.remove(&category.id)?;
            println!("Removed budget for {}", category.name);
        }

        BudgetCommands::Status { month } => {
            let reference = status_reference_date(month.as_deref(), today)?;
            let snapshot = storage::snapshot(storage)?;
            let report = cache.budget_status(&snapshot, reference);
            print!(
                "{}",
                report.format_terminal(cache.converter(), &settings.base_currency)
            );
        }
    }

    Ok(())
}

/// A date inside the month whose budget status is shown
fn status_reference_date(month: Option<&str>, today: NaiveDate) -> FinTrackResult<NaiveDate> {
    match month {
        Some(key) => Ok(Month::parse(key)?.start_date()),
        None => Ok(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reference_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        assert_eq!(status_reference_date(None, today).unwrap(), today);
        assert_eq!(
            status_reference_date(Some("2024-12"), today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
        );
        assert!(status_reference_date(Some("2024-13"), today)
            .unwrap_err()
            .is_validation());
        assert!(status_reference_date(Some("December"), today)
            .unwrap_err()
            .is_validation());
    }
}
