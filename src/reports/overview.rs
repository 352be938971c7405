//! Dashboard overview
//!
//! All-time balances, this month's flows, a six-month trend, spend per
//! category and the most recent transactions, converted into the display
//! currency.

use chrono::NaiveDate;

use super::analytics::{monthly_series, savings_rate, CategoryAmount, MonthlyPoint};
use super::transactions::{filter_transactions, TransactionRow};
use crate::models::{CurrencyCode, FilterState, LedgerSnapshot, Month, Transaction, TransactionType};
use crate::services::period::month_window;
use crate::services::CurrencyConverter;

/// Months shown in the dashboard trend, current month included
pub const TREND_MONTHS: u32 = 6;

/// Dashboard summary of the whole ledger
#[derive(Debug, Clone)]
pub struct OverviewReport {
    pub display_currency: CurrencyCode,
    pub month: Month,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub savings_rate: i64,
    pub month_income: f64,
    pub month_expense: f64,
    /// Oldest first, ending with the current month
    pub monthly: Vec<MonthlyPoint>,
    /// All-time expense per category, largest first
    pub by_category: Vec<CategoryAmount>,
    /// Newest first
    pub recent: Vec<TransactionRow>,
    pub transaction_count: usize,
}

impl OverviewReport {
    pub fn generate(
        snapshot: &LedgerSnapshot,
        converter: &CurrencyConverter,
        display_currency: &CurrencyCode,
        recent_count: usize,
        today: NaiveDate,
    ) -> Self {
        let month = Month::of(today);
        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        let mut month_income = 0.0;
        let mut month_expense = 0.0;

        let converted: Vec<(&Transaction, f64)> = snapshot
            .transactions
            .iter()
            .map(|t| (t, converter.convert(t.amount, &t.currency, display_currency)))
            .collect();

        for &(txn, amount) in &converted {
            let this_month = month.contains(txn.date);
            match txn.kind {
                TransactionType::Income => {
                    total_income += amount;
                    if this_month {
                        month_income += amount;
                    }
                }
                TransactionType::Expense => {
                    total_expense += amount;
                    if this_month {
                        month_expense += amount;
                    }
                }
            }
        }

        let monthly = monthly_series(&month_window(TREND_MONTHS, today), &converted);

        let mut by_category: Vec<CategoryAmount> = snapshot
            .categories
            .iter()
            .map(|category| {
                let value: f64 = converted
                    .iter()
                    .filter(|(t, _)| t.is_expense() && t.category_id == category.id)
                    .map(|(_, amount)| amount)
                    .sum();
                CategoryAmount {
                    category: category.clone(),
                    value,
                    percentage: if total_expense > 0.0 {
                        value / total_expense * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .filter(|row| row.value != 0.0)
            .collect();
        by_category.sort_by(|a, b| b.value.total_cmp(&a.value));

        let mut recent = filter_transactions(
            &snapshot.transactions,
            &snapshot.categories,
            &FilterState::default(),
        );
        recent.truncate(recent_count);

        let net_balance = total_income - total_expense;

        Self {
            display_currency: display_currency.clone(),
            month,
            total_income,
            total_expense,
            net_balance,
            savings_rate: savings_rate(net_balance, total_income),
            month_income,
            month_expense,
            monthly,
            by_category,
            recent,
            transaction_count: snapshot.transactions.len(),
        }
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, converter: &CurrencyConverter) -> String {
        let fmt = |amount: f64| converter.format(amount, &self.display_currency);
        let mut output = String::new();

        output.push_str(&format!("Overview ({})\n", self.display_currency));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Net Balance:    {:>20}\n", fmt(self.net_balance)));
        output.push_str(&format!("Total Income:   {:>20}\n", fmt(self.total_income)));
        output.push_str(&format!("Total Expense:  {:>20}\n", fmt(self.total_expense)));
        output.push_str(&format!("Savings Rate:   {:>19}%\n", self.savings_rate));
        output.push_str(&format!(
            "{}:  income {}  expense {}\n",
            self.month,
            fmt(self.month_income),
            fmt(self.month_expense)
        ));
        output.push_str(&format!("Transactions:   {:>20}\n", self.transaction_count));

        if self.monthly.iter().any(MonthlyPoint::is_active) {
            let compact = |amount: f64| converter.format_compact(amount, &self.display_currency);
            output.push_str("\nTrend\n");
            for point in &self.monthly {
                output.push_str(&format!(
                    "  {:<8} income {:>12}  expense {:>12}  net {:>12}\n",
                    point.label,
                    compact(point.income),
                    compact(point.expense),
                    compact(point.net)
                ));
            }
        }

        if !self.by_category.is_empty() {
            output.push_str("\nTop spending\n");
            for row in self.by_category.iter().take(5) {
                output.push_str(&format!(
                    "  {:<30} {:>16} {:>6.1}%\n",
                    row.category.to_string(),
                    converter.format_compact(row.value, &self.display_currency),
                    row.percentage
                ));
            }
        }

        if !self.recent.is_empty() {
            output.push_str("\nRecent\n");
            for row in &self.recent {
                let txn = &row.transaction;
                output.push_str(&format!(
                    "  {}  {:<18} {:<24} {:>14}\n",
                    txn.date,
                    row.display_category(),
                    txn.description,
                    converter.format(txn.signed_amount(), &txn.currency)
                ));
            }
        }

        output
    }
}
