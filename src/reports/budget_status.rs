//! Budget status report
//!
//! Compares current-month expense spend per category against the budget
//! limits. Spend and limits are compared in the units they were entered in;
//! no currency conversion happens here.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::models::{BudgetPeriod, Category, CategoryId, CurrencyCode, LedgerSnapshot, Month};
use crate::services::period::{current_month, MonthBucket};
use crate::services::CurrencyConverter;

/// Percentage at which a budget turns to warning
pub const WARNING_THRESHOLD: f64 = 80.0;

/// Percentage at which a budget is over
pub const OVER_THRESHOLD: f64 = 100.0;

/// Health of a single budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetStatus {
    Safe,
    Warning,
    Over,
}

impl BudgetStatus {
    /// Classify an unclamped usage percentage
    pub fn from_pct(pct: f64) -> Self {
        if pct >= OVER_THRESHOLD {
            Self::Over
        } else if pct >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Safe
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Warning => write!(f, "warning"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// A category with a budget limit
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetedCategory {
    pub category: Category,
    pub limit: f64,
    pub period: BudgetPeriod,
    pub spent: f64,
    pub remaining: f64,
    pub overage: f64,
    /// Usage clamped to 100 for display
    pub pct: f64,
    /// Unclamped usage; the list is ordered by this
    pub raw_pct: f64,
    pub status: BudgetStatus,
}

impl BudgetedCategory {
    fn new(category: &Category, limit: f64, period: BudgetPeriod, spent: f64) -> Self {
        let raw_pct = if limit > 0.0 { spent / limit * 100.0 } else { 0.0 };

        Self {
            category: category.clone(),
            limit,
            period,
            spent,
            remaining: (limit - spent).max(0.0),
            overage: (spent - limit).max(0.0),
            pct: raw_pct.min(100.0),
            raw_pct,
            status: BudgetStatus::from_pct(raw_pct),
        }
    }
}

/// An expense category without a budget limit
#[derive(Debug, Clone, PartialEq)]
pub struct UnbudgetedCategory {
    pub category: Category,
    pub spent: f64,
}

/// Roll-up across the budgeted categories
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetTotals {
    pub total_limit: f64,
    pub total_spent: f64,
    pub over_count: usize,
    pub warn_count: usize,
}

/// Budget health for the current month
#[derive(Debug, Clone)]
pub struct BudgetStatusReport {
    pub month: Month,
    /// Most critical first
    pub budgeted: Vec<BudgetedCategory>,
    /// Category order
    pub unbudgeted: Vec<UnbudgetedCategory>,
    pub totals: BudgetTotals,
}

impl BudgetStatusReport {
    /// Evaluate every expense category against its limit for `today`'s month
    pub fn generate(snapshot: &LedgerSnapshot, today: NaiveDate) -> Self {
        let bucket = current_month(today);
        let month = bucket.month;
        let spend = monthly_spend(snapshot, &bucket);

        let mut budgeted = Vec::new();
        let mut unbudgeted = Vec::new();

        for category in snapshot.categories.iter().filter(|c| c.is_expense()) {
            let spent = spend.get(&category.id).copied().unwrap_or(0.0);
            match snapshot.budgets.get(&category.id) {
                Some(entry) => {
                    budgeted.push(BudgetedCategory::new(category, entry.limit, entry.period, spent))
                }
                None => unbudgeted.push(UnbudgetedCategory {
                    category: category.clone(),
                    spent,
                }),
            }
        }

        budgeted.sort_by(|a, b| b.raw_pct.total_cmp(&a.raw_pct));

        let totals = BudgetTotals {
            total_limit: budgeted.iter().map(|b| b.limit).sum(),
            total_spent: budgeted.iter().map(|b| b.spent).sum(),
            over_count: budgeted
                .iter()
                .filter(|b| b.status == BudgetStatus::Over)
                .count(),
            warn_count: budgeted
                .iter()
                .filter(|b| b.status == BudgetStatus::Warning)
                .count(),
        };

        tracing::trace!(
            %month,
            budgeted = budgeted.len(),
            unbudgeted = unbudgeted.len(),
            "derived budget status"
        );

        Self {
            month,
            budgeted,
            unbudgeted,
            totals,
        }
    }

    /// Find the status row for a category
    pub fn find(&self, category_id: &CategoryId) -> Option<&BudgetedCategory> {
        self.budgeted.iter().find(|b| &b.category.id == category_id)
    }

    /// Format the report for terminal display
    ///
    /// Amounts are shown with `currency`'s symbol but are not converted.
    pub fn format_terminal(&self, converter: &CurrencyConverter, currency: &CurrencyCode) -> String {
        let fmt = |amount: f64| converter.format(amount, currency);
        let mut output = String::new();

        output.push_str(&format!("Budget Status: {}\n", self.month));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.budgeted.is_empty() {
            output.push_str("No budgets set.\n");
        } else {
            output.push_str(&format!(
                "{:<28} {:>12} {:>12} {:>12} {:>6}  {}\n",
                "Category", "Limit", "Spent", "Remaining", "Used", "Status"
            ));
            output.push_str(&"-".repeat(80));
            output.push('\n');

            for row in &self.budgeted {
                output.push_str(&format!(
                    "{:<28} {:>12} {:>12} {:>12} {:>5.0}%  {}\n",
                    row.category.to_string(),
                    fmt(row.limit),
                    fmt(row.spent),
                    fmt(row.remaining),
                    row.pct,
                    status_marker(row.status)
                ));
            }

            output.push_str(&"-".repeat(80));
            output.push('\n');
            output.push_str(&format!(
                "{:<28} {:>12} {:>12}\n",
                "TOTAL",
                fmt(self.totals.total_limit),
                fmt(self.totals.total_spent)
            ));
            output.push_str(&format!(
                "{} over, {} warning\n",
                self.totals.over_count, self.totals.warn_count
            ));
        }

        if !self.unbudgeted.is_empty() {
            output.push_str("\nWithout a budget:\n");
            for row in &self.unbudgeted {
                output.push_str(&format!(
                    "  {:<26} {:>12}\n",
                    row.category.to_string(),
                    fmt(row.spent)
                ));
            }
        }

        output
    }
}

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Safe => "safe",
        BudgetStatus::Warning => "WARNING",
        BudgetStatus::Over => "OVER",
    }
}

/// Raw expense spend per category within a month
fn monthly_spend<'a>(
    snapshot: &'a LedgerSnapshot,
    bucket: &MonthBucket,
) -> HashMap<&'a CategoryId, f64> {
    let mut spend: HashMap<&CategoryId, f64> = HashMap::new();
    for txn in snapshot
        .transactions
        .iter()
        .filter(|t| t.is_expense() && bucket.contains(t.date))
    {
        *spend.entry(&txn.category_id).or_insert(0.0) += txn.amount;
    }
    spend
}
