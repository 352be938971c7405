//! CLI commands for reports
//!
//! The analytics and overview views, both memoized by the derivation cache.

use chrono::NaiveDate;
use clap::Args;

use super::parse_currency;
use crate::cache::DerivationCache;
use crate::config::settings::Settings;
use crate::error::FinTrackResult;
use crate::models::CurrencyCode;
use crate::services::period::validate_period;
use crate::storage::{self, Storage};

/// Options for the analytics view
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyticsArgs {
    /// Number of months to analyze, current month included
    #[arg(short, long)]
    pub period: Option<u32>,

    /// Currency to show figures in, defaults to the display currency
    #[arg(short, long)]
    pub currency: Option<String>,
}

/// Options for the dashboard overview
#[derive(Args, Debug, Clone, Default)]
pub struct OverviewArgs {
    /// Currency to show figures in, defaults to the display currency
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Number of recent transactions to list
    #[arg(short, long)]
    pub recent: Option<usize>,
}

/// Handle the analytics command
pub fn handle_analytics_command(
    storage: &Storage,
    settings: &Settings,
    cache: &DerivationCache,
    today: NaiveDate,
    args: AnalyticsArgs,
) -> FinTrackResult<()> {
    let currency = resolve_currency(args.currency.as_deref(), settings, cache)?;
    let period = match args.period {
        Some(period) => validate_period(period)?,
        None => settings.analytics_period(),
    };

    let snapshot = storage::snapshot(storage)?;
    let report = cache.analytics(&snapshot, &currency, period, today);
    print!("{}", report.format_terminal(cache.converter()));

    Ok(())
}

/// Handle the overview command
pub fn handle_overview_command(
    storage: &Storage,
    settings: &Settings,
    cache: &DerivationCache,
    today: NaiveDate,
    args: OverviewArgs,
) -> FinTrackResult<()> {
    let currency = resolve_currency(args.currency.as_deref(), settings, cache)?;
    let recent = args.recent.unwrap_or(settings.recent_count);

    let snapshot = storage::snapshot(storage)?;
    let report = cache.overview(&snapshot, &currency, recent, today);
    print!("{}", report.format_terminal(cache.converter()));

    Ok(())
}

fn resolve_currency(
    requested: Option<&str>,
    settings: &Settings,
    cache: &DerivationCache,
) -> FinTrackResult<CurrencyCode> {
    match requested {
        Some(code) => parse_currency(code, cache.converter()),
        None => Ok(settings.display_currency.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_currency_defaults_to_settings() {
        let cache = DerivationCache::default();
        let settings = Settings {
            display_currency: CurrencyCode::new("EUR"),
            ..Settings::default()
        };

        assert_eq!(
            resolve_currency(None, &settings, &cache).unwrap().as_str(),
            "EUR"
        );
        assert_eq!(
            resolve_currency(Some("gbp"), &settings, &cache).unwrap().as_str(),
            "GBP"
        );
        assert!(resolve_currency(Some("ABC"), &settings, &cache)
            .unwrap_err()
            .is_validation());
    }
}
