//! Transaction list report
//!
//! Applies a [`FilterState`] to the ledger and produces the ordered rows of
//! the transaction list, the active-filter badge count and raw summary totals
//! over exactly the rows shown.

use std::cmp::Ordering;

use crate::models::{
    Category, FilterState, LedgerSnapshot, SortKey, SortOrder, Transaction,
};
use crate::services::CurrencyConverter;

/// Name shown for transactions whose category no longer resolves
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A transaction joined with its resolved category
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub category: Option<Category>,
}

impl TransactionRow {
    /// Resolved category name, empty when the reference dangles
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Category name for display
    pub fn display_category(&self) -> &str {
        match &self.category {
            Some(c) => c.name.as_str(),
            None => UNCATEGORIZED,
        }
    }
}

/// Totals over the filtered rows, in entered units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterSummary {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub count: usize,
}

/// Filtered, sorted transaction list
#[derive(Debug, Clone)]
pub struct TransactionListReport {
    pub rows: Vec<TransactionRow>,
    /// Number of filter dimensions away from their defaults
    pub active_filters: usize,
    pub summary: FilterSummary,
}

impl TransactionListReport {
    /// Filter and sort the snapshot's transactions
    pub fn generate(snapshot: &LedgerSnapshot, filter: &FilterState) -> Self {
        let rows = filter_transactions(&snapshot.transactions, &snapshot.categories, filter);
        let summary = summarize(&rows);

        tracing::trace!(
            shown = rows.len(),
            total = snapshot.transactions.len(),
            "filtered transaction list"
        );

        Self {
            rows,
            active_filters: filter.active_count(),
            summary,
        }
    }

    /// Format the list for terminal display, amounts in their own currency
    pub fn format_terminal(&self, converter: &CurrencyConverter) -> String {
        let mut output = String::new();

        if self.active_filters > 0 {
            output.push_str(&format!("Active filters: {}\n", self.active_filters));
        }

        if self.rows.is_empty() {
            output.push_str("No transactions match.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10}  {:<7}  {:<18}  {:<30}  {:>14}\n",
            "Date", "Type", "Category", "Description", "Amount"
        ));
        output.push_str(&"-".repeat(87));
        output.push('\n');

        for row in &self.rows {
            let txn = &row.transaction;
            output.push_str(&format!(
                "{:<10}  {:<7}  {:<18}  {:<30}  {:>14}\n",
                txn.date,
                txn.kind,
                truncate(row.display_category(), 18),
                truncate(&txn.description, 30),
                converter.format(txn.signed_amount(), &txn.currency),
            ));
        }

        output.push_str(&"-".repeat(87));
        output.push('\n');
        output.push_str(&format!(
            "{} transactions  income {:.2}  expense {:.2}  net {:.2}\n",
            self.summary.count, self.summary.income, self.summary.expense, self.summary.net
        ));

        output
    }
}

/// Apply every filter dimension, then sort stably
pub fn filter_transactions(
    transactions: &[Transaction],
    categories: &[Category],
    filter: &FilterState,
) -> Vec<TransactionRow> {
    let index = crate::models::snapshot::category_index(categories);
    let query = filter.has_search().then(|| filter.search.to_lowercase());

    let mut rows: Vec<TransactionRow> = transactions
        .iter()
        .filter(|t| filter.kind.matches(t.kind))
        .filter(|t| filter.category.matches(&t.category_id))
        .map(|t| TransactionRow {
            transaction: t.clone(),
            category: index.get(&t.category_id).map(|c| (*c).clone()),
        })
        .filter(|row| match &query {
            Some(q) => {
                row.transaction.description.to_lowercase().contains(q.as_str())
                    || row.category_name().to_lowercase().contains(q.as_str())
            }
            None => true,
        })
        .filter(|row| filter.date_from.map_or(true, |from| row.transaction.date >= from))
        .filter(|row| filter.date_to.map_or(true, |to| row.transaction.date <= to))
        .collect();

    // `sort_by` is stable; descending flips the comparator, not the output
    rows.sort_by(|a, b| {
        let ordering = compare_rows(a, b, filter.sort_by);
        match filter.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    rows
}

fn compare_rows(a: &TransactionRow, b: &TransactionRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.transaction.date.cmp(&b.transaction.date),
        SortKey::Amount => a.transaction.amount.total_cmp(&b.transaction.amount),
        SortKey::Category => a.category_name().cmp(b.category_name()),
    }
}

fn summarize(rows: &[TransactionRow]) -> FilterSummary {
    let (income, expense) = rows.iter().fold((0.0, 0.0), |(inc, exp), row| {
        if row.transaction.is_income() {
            (inc + row.transaction.amount, exp)
        } else {
            (inc, exp + row.transaction.amount)
        }
    });

    FilterSummary {
        income,
        expense,
        net: income - expense,
        count: rows.len(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
