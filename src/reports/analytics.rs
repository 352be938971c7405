//! Analytics report
//!
//! Period-aware analytics over the ledger: windowed totals, a monthly trend
//! series, category breakdowns and best/worst month insights. Every amount is
//! converted into the display currency per transaction before it is summed.

use chrono::NaiveDate;

use crate::models::{Category, CurrencyCode, LedgerSnapshot, Month, Transaction, TransactionType};
use crate::services::period::{clamp_period, month_window, window_bounds, MonthBucket};
use crate::services::CurrencyConverter;

/// One bucket of the monthly trend series
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    pub month: Month,
    /// "YYYY-MM"
    pub key: String,
    pub label: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

impl MonthlyPoint {
    /// Whether anything was recorded in this month
    pub fn is_active(&self) -> bool {
        self.income + self.expense > 0.0
    }
}

/// A category's converted total within a breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAmount {
    pub category: Category,
    pub value: f64,
    /// Share of the breakdown's total, 0-100
    pub percentage: f64,
}

/// Analytics over the last `period` months
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub display_currency: CurrencyCode,
    /// Window length in months, current month included (always >= 1)
    pub period: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
    /// Rounded percentage of income saved; 0 without income
    pub savings_rate: i64,
    /// Oldest to newest, one entry per month of the window
    pub monthly: Vec<MonthlyPoint>,
    /// Expense totals per category, largest first, zero totals dropped
    pub exp_by_category: Vec<CategoryAmount>,
    /// Income totals per category, largest first, zero totals dropped
    pub inc_by_category: Vec<CategoryAmount>,
    pub best_month: Option<MonthlyPoint>,
    pub worst_month: Option<MonthlyPoint>,
    pub avg_monthly_expense: f64,
    /// Transactions inside the window
    pub txn_count: usize,
}

impl AnalyticsReport {
    /// Generate analytics for the `period` months ending with `today`'s month
    pub fn generate(
        snapshot: &LedgerSnapshot,
        converter: &CurrencyConverter,
        display_currency: &CurrencyCode,
        period: u32,
        today: NaiveDate,
    ) -> Self {
        let period = clamp_period(period);
        let buckets = month_window(period, today);
        let (start_date, end_date) = match window_bounds(&buckets) {
            Some(bounds) => bounds,
            None => (today, today),
        };

        // Convert once per transaction, then only ever sum converted values
        let windowed: Vec<(&Transaction, f64)> = snapshot
            .transactions
            .iter()
            .filter(|t| t.date >= start_date && t.date <= end_date)
            .map(|t| (t, converter.convert(t.amount, &t.currency, display_currency)))
            .collect();

        let total_income = sum_of(&windowed, TransactionType::Income);
        let total_expense = sum_of(&windowed, TransactionType::Expense);
        let net_savings = total_income - total_expense;

        let monthly = monthly_series(&buckets, &windowed);
        let best_month = pick_month(&monthly, |candidate, best| candidate > best);
        let worst_month = pick_month(&monthly, |candidate, worst| candidate < worst);

        let exp_by_category = breakdown(
            &snapshot.categories,
            &windowed,
            TransactionType::Expense,
            total_expense,
        );
        let inc_by_category = breakdown(
            &snapshot.categories,
            &windowed,
            TransactionType::Income,
            total_income,
        );

        tracing::trace!(
            period,
            currency = %display_currency,
            windowed = windowed.len(),
            "derived analytics"
        );

        Self {
            display_currency: display_currency.clone(),
            period,
            start_date,
            end_date,
            total_income,
            total_expense,
            net_savings,
            savings_rate: savings_rate(net_savings, total_income),
            monthly,
            exp_by_category,
            inc_by_category,
            best_month,
            worst_month,
            avg_monthly_expense: total_expense / period as f64,
            txn_count: windowed.len(),
        }
    }

    /// Largest expense category, if any expense was recorded
    pub fn biggest_expense_category(&self) -> Option<&CategoryAmount> {
        self.exp_by_category.first()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, converter: &CurrencyConverter) -> String {
        let fmt = |amount: f64| converter.format(amount, &self.display_currency);
        let mut output = String::new();

        output.push_str(&format!(
            "Analytics: {} to {} ({} month{}, {})\n",
            self.start_date,
            self.end_date,
            self.period,
            if self.period == 1 { "" } else { "s" },
            self.display_currency
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Total Income:        {:>16}\n", fmt(self.total_income)));
        output.push_str(&format!("Total Expense:       {:>16}\n", fmt(self.total_expense)));
        output.push_str(&format!("Net Savings:         {:>16}\n", fmt(self.net_savings)));
        output.push_str(&format!("Savings Rate:        {:>15}%\n", self.savings_rate));
        output.push_str(&format!(
            "Avg Monthly Expense: {:>16}\n",
            fmt(self.avg_monthly_expense)
        ));
        output.push_str(&format!("Transactions:        {:>16}\n", self.txn_count));

        if let Some(best) = &self.best_month {
            output.push_str(&format!("Best Month:  {} ({})\n", best.label, fmt(best.net)));
        }
        if let Some(worst) = &self.worst_month {
            output.push_str(&format!("Worst Month: {} ({})\n", worst.label, fmt(worst.net)));
        }
        if let Some(biggest) = self.biggest_expense_category() {
            output.push_str(&format!(
                "Biggest Expense: {} ({})\n",
                biggest.category.name,
                fmt(biggest.value)
            ));
        }

        output.push_str(&format!(
            "\n{:<10} {:>16} {:>16} {:>16}\n",
            "Month", "Income", "Expense", "Net"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for point in &self.monthly {
            output.push_str(&format!(
                "{:<10} {:>16} {:>16} {:>16}\n",
                point.label,
                fmt(point.income),
                fmt(point.expense),
                fmt(point.net)
            ));
        }

        for (title, rows) in [
            ("Expenses by Category", &self.exp_by_category),
            ("Income by Category", &self.inc_by_category),
        ] {
            if rows.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}\n", title));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for row in rows {
                output.push_str(&format!(
                    "{:<35} {:>16} {:>7.1}%\n",
                    row.category.to_string(),
                    fmt(row.value),
                    row.percentage
                ));
            }
        }

        output
    }
}

/// Percentage of income kept, rounded half away from zero; 0 without income
pub fn savings_rate(net: f64, income: f64) -> i64 {
    if income > 0.0 {
        (net / income * 100.0).round() as i64
    } else {
        0
    }
}

fn sum_of(items: &[(&Transaction, f64)], kind: TransactionType) -> f64 {
    items
        .iter()
        .filter(|(t, _)| t.kind == kind)
        .map(|(_, amount)| amount)
        .sum()
}

pub(crate) fn monthly_series(buckets: &[MonthBucket], windowed: &[(&Transaction, f64)]) -> Vec<MonthlyPoint> {
    buckets
        .iter()
        .map(|bucket| {
            let in_month: Vec<(&Transaction, f64)> = windowed
                .iter()
                .filter(|(t, _)| bucket.contains(t.date))
                .copied()
                .collect();
            let income = sum_of(&in_month, TransactionType::Income);
            let expense = sum_of(&in_month, TransactionType::Expense);

            MonthlyPoint {
                month: bucket.month,
                key: bucket.key.clone(),
                label: bucket.label.clone(),
                income,
                expense,
                net: income - expense,
            }
        })
        .collect()
}

/// Fold over active months, replacing the pick only when `better` holds
/// strictly, so the earliest month wins ties
fn pick_month(monthly: &[MonthlyPoint], better: impl Fn(f64, f64) -> bool) -> Option<MonthlyPoint> {
    monthly
        .iter()
        .filter(|m| m.is_active())
        .fold(None, |picked: Option<&MonthlyPoint>, m| match picked {
            Some(p) if !better(m.net, p.net) => Some(p),
            _ => Some(m),
        })
        .cloned()
}

fn breakdown(
    categories: &[Category],
    windowed: &[(&Transaction, f64)],
    kind: TransactionType,
    total: f64,
) -> Vec<CategoryAmount> {
    let mut rows: Vec<CategoryAmount> = categories
        .iter()
        .map(|category| {
            let value: f64 = windowed
                .iter()
                .filter(|(t, _)| t.kind == kind && t.category_id == category.id)
                .map(|(_, amount)| amount)
                .sum();
            CategoryAmount {
                category: category.clone(),
                value,
                percentage: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            }
        })
        .filter(|row| row.value != 0.0)
        .collect();

    // Stable: equal totals keep category order
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows
}
