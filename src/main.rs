use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cache::DerivationCache;
use fintrack::cli::{
    handle_analytics_command, handle_budget_command, handle_category_command,
    handle_config_command, handle_export_command, handle_overview_command,
    handle_transaction_command, AnalyticsArgs, BudgetCommands, CategoryCommands, ConfigArgs,
    ExportArgs, OverviewArgs, TransactionCommands,
};
use fintrack::config::{paths::FinTrackPaths, settings::Settings};
use fintrack::models::default_categories;
use fintrack::services::period::today;
use fintrack::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Personal income and expense ledger",
    long_about = "FinTrack records income and expenses by category and turns them \
                  into filtered lists, multi-month analytics, budget status and a \
                  dashboard overview, converted into the currency of your choice."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger with the default categories
    Init,

    /// Show or change configuration
    Config(ConfigArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Income, expense and savings analytics over recent months
    Analytics(AnalyticsArgs),

    /// Dashboard overview
    #[command(alias = "dashboard")]
    Overview(OverviewArgs),

    /// Export transactions to CSV
    Export(ExportArgs),
}

fn main() -> Result<()> {
    fintrack::logging::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinTrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let cache = DerivationCache::default();
    let today = today();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing FinTrack at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories have been created:");
            let (income, expense): (Vec<_>, Vec<_>) =
                default_categories().into_iter().partition(|c| c.is_income());
            let names = |list: Vec<fintrack::models::Category>| {
                list.into_iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            println!("  - Expense: {}", names(expense));
            println!("  - Income:  {}", names(income));
            println!();
            println!("Run 'fintrack category list' to see all categories.");
        }
        Some(Commands::Config(args)) => {
            handle_config_command(&paths, &mut settings, cache.converter(), args)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_transaction_command(&storage, &settings, cache.converter(), today, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_budget_command(&storage, &settings, &cache, today, cmd)?;
        }
        Some(Commands::Analytics(args)) => {
            let storage = Storage::open(paths)?;
            handle_analytics_command(&storage, &settings, &cache, today, args)?;
        }
        Some(Commands::Overview(args)) => {
            let storage = Storage::open(paths)?;
            handle_overview_command(&storage, &settings, &cache, today, args)?;
        }
        Some(Commands::Export(args)) => {
            let storage = Storage::open(paths)?;
            handle_export_command(&storage, today, args)?;
        }
        None => {
            println!("FinTrack - personal income and expense ledger");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
