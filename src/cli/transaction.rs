//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management and the filtered
//! transaction list.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{parse_amount, parse_currency, parse_date, parse_date_or_today};
use crate::config::settings::Settings;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{
    CategoryFilter, FilterState, SortKey, SortOrder, Transaction, TransactionType, TypeFilter,
};
use crate::reports::TransactionListReport;
use crate::services::currency::CurrencyConverter;
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionService, UpdateTransactionInput,
};
use crate::storage::{self, LedgerStore, Storage};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Transaction type (income or expense)
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Amount, always positive (e.g., "42.50")
        amount: String,
        /// Description
        description: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Currency code, defaults to the configured base currency
        #[arg(long)]
        currency: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List transactions
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (or unique prefix)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (or unique prefix)
        id: String,
        /// New type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New currency
        #[arg(long)]
        currency: Option<String>,
        /// New notes
        #[arg(short, long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (or unique prefix)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Filter and sort options shared by `transaction list` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text search over description and category name
    #[arg(short, long)]
    pub search: Option<String>,
    /// Transaction type (all, income, expense)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
    /// Category name or ID
    #[arg(short = 'C', long)]
    pub category: Option<String>,
    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<String>,
    /// Sort key (date, amount, category)
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort order (asc, desc)
    #[arg(long)]
    pub order: Option<String>,
}

impl FilterArgs {
    /// Resolve the arguments into a filter state
    pub fn to_filter_state<L: LedgerStore + ?Sized>(&self, ledger: &L) -> FinTrackResult<FilterState> {
        let mut filter = FilterState::default();

        if let Some(search) = &self.search {
            filter.search = search.clone();
        }

        if let Some(kind) = &self.kind {
            filter.kind = kind.parse::<TypeFilter>()?;
        }

        if let Some(category) = &self.category {
            let category = CategoryService::new(ledger).require(category)?;
            filter.category = CategoryFilter::Only(category.id);
        }

        filter.date_from = self.from.as_deref().map(parse_date).transpose()?;
        filter.date_to = self.to.as_deref().map(parse_date).transpose()?;

        if let Some(sort) = &self.sort {
            filter.sort_by = sort.parse::<SortKey>()?;
        }

        if let Some(order) = &self.order {
            filter.sort_order = order.parse::<SortOrder>()?;
        }

        Ok(filter)
    }
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    converter: &CurrencyConverter,
    today: NaiveDate,
    cmd: TransactionCommands,
) -> FinTrackResult<()> {
    let service = TransactionService::new(storage, settings.base_currency.clone());
    let category_service = CategoryService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            description,
            category,
            date,
            currency,
            notes,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = parse_amount(&amount)?;
            let category = category_service.require(&category)?;
            let date = parse_date_or_today(date.as_deref(), today)?;
            let currency = currency
                .as_deref()
                .map(|c| parse_currency(c, converter))
                .transpose()?;

            let txn = service.create(CreateTransactionInput {
                kind,
                amount,
                category_id: category.id.clone(),
                description,
                date,
                currency,
                notes,
            })?;

            println!("Created transaction:");
            print_details(&txn, &category.name, converter);
        }

        TransactionCommands::List { filter } => {
            let filter = filter.to_filter_state(storage)?;
            let snapshot = storage::snapshot(storage)?;
            let report = TransactionListReport::generate(&snapshot, &filter);
            print!("{}", report.format_terminal(converter));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinTrackError::transaction_not_found(&id))?;
            let category_name = category_service
                .get(&txn.category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| txn.category_id.to_string());
            print_details(&txn, &category_name, converter);
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            description,
            date,
            currency,
            notes,
            clear_notes,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinTrackError::transaction_not_found(&id))?;

            let notes = if clear_notes { Some(None) } else { notes.map(Some) };

            let changes = UpdateTransactionInput {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category_id: category
                    .as_deref()
                    .map(|c| category_service.require(c).map(|c| c.id))
                    .transpose()?,
                description,
                date: date.as_deref().map(parse_date).transpose()?,
                currency: currency
                    .as_deref()
                    .map(|c| parse_currency(c, converter))
                    .transpose()?,
                notes,
            };

            if changes.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(&txn.id, changes)?;
            let category_name = category_service
                .get(&updated.category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| updated.category_id.to_string());

            println!("Updated transaction:");
            print_details(&updated, &category_name, converter);
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinTrackError::transaction_not_found(&id))?;

            if !force {
                println!("About to delete transaction:");
                println!("  Date:        {}", txn.date);
                println!("  Amount:      {}", converter.format(txn.amount, &txn.currency));
                println!("  Description: {}", txn.description);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(&txn.id)?;
            println!(
                "Deleted transaction: {} ({} {})",
                deleted.id, deleted.date, deleted.description
            );
        }
    }

    Ok(())
}

fn parse_kind(kind: &str) -> FinTrackResult<TransactionType> {
    Ok(kind.parse::<TransactionType>()?)
}

fn print_details(txn: &Transaction, category_name: &str, converter: &CurrencyConverter) {
    println!("  ID:          {}", txn.id);
    println!("  Date:        {}", txn.date);
    println!("  Type:        {}", txn.kind);
    println!("  Amount:      {}", converter.format(txn.amount, &txn.currency));
    println!("  Category:    {}", category_name);
    println!("  Description: {}", txn.description);
    if let Some(notes) = &txn.notes {
        println!("  Notes:       {}", notes);
    }
}
