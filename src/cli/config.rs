//! Configuration CLI command
//!
//! Shows the resolved paths and settings, and updates settings in place.

use clap::Args;

use super::parse_currency;
use crate::config::paths::FinTrackPaths;
use crate::config::settings::Settings;
use crate::error::FinTrackResult;
use crate::services::currency::CurrencyConverter;
use crate::services::period::validate_period;

/// Options for `config`; with no options the current configuration is shown
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Currency analytics and the overview are shown in
    #[arg(long)]
    pub display_currency: Option<String>,

    /// Currency assumed for transactions added without one
    #[arg(long)]
    pub base_currency: Option<String>,

    /// Default analytics window in months
    #[arg(long)]
    pub period: Option<u32>,

    /// Number of recent transactions on the overview
    #[arg(long)]
    pub recent: Option<usize>,
}

impl ConfigArgs {
    fn is_empty(&self) -> bool {
        self.display_currency.is_none()
            && self.base_currency.is_none()
            && self.period.is_none()
            && self.recent.is_none()
    }
}

/// Handle the config command
pub fn handle_config_command(
    paths: &FinTrackPaths,
    settings: &mut Settings,
    converter: &CurrencyConverter,
    args: ConfigArgs,
) -> FinTrackResult<()> {
    if !args.is_empty() {
        apply_changes(settings, converter, args)?;
        settings.save(paths)?;
        tracing::info!(
            display_currency = %settings.display_currency,
            base_currency = %settings.base_currency,
            period = settings.analytics_period,
            "updated settings"
        );
        println!("Settings updated.");
        println!();
    }

    println!("FinTrack Configuration");
    println!("======================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!();
    println!("Settings:");
    println!("  Display currency: {}", settings.display_currency);
    println!("  Base currency:    {}", settings.base_currency);
    println!("  Analytics period: {} months", settings.analytics_period());
    println!("  Recent count:     {}", settings.recent_count);

    Ok(())
}

fn apply_changes(
    settings: &mut Settings,
    converter: &CurrencyConverter,
    args: ConfigArgs,
) -> FinTrackResult<()> {
    if let Some(code) = args.display_currency {
        settings.display_currency = parse_currency(&code, converter)?;
    }
    if let Some(code) = args.base_currency {
        settings.base_currency = parse_currency(&code, converter)?;
    }
    if let Some(period) = args.period {
        settings.analytics_period = validate_period(period)?;
    }
    if let Some(recent) = args.recent {
        settings.recent_count = recent;
    }
    Ok(())
}
