//! Derived views of the ledger
//!
//! Each report is a pure function of a [`LedgerSnapshot`](crate::models::LedgerSnapshot)
//! and a few view parameters, and knows how to render itself for the terminal.

pub mod analytics;
pub mod budget_status;
pub mod overview;
pub mod transactions;

pub use analytics::{AnalyticsReport, CategoryAmount, MonthlyPoint};
pub use budget_status::{BudgetStatus, BudgetStatusReport, BudgetedCategory, UnbudgetedCategory};
pub use overview::OverviewReport;
pub use transactions::{FilterSummary, TransactionListReport, TransactionRow};
