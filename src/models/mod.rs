//! Core data models for FinTrack
//!
//! This module contains the ledger entities (transactions, categories,
//! budget limits) and the small value types the derivation engine works
//! with (currency codes, calendar months, filter state, snapshots).

pub mod budget;
pub mod category;
pub mod currency;
pub mod filter;
pub mod ids;
pub mod month;
pub mod snapshot;
pub mod transaction;

pub use budget::{BudgetEntry, BudgetMap, BudgetPeriod};
pub use category::{default_categories, Category, CategoryKind};
pub use currency::CurrencyCode;
pub use filter::{CategoryFilter, FilterState, SortKey, SortOrder, TypeFilter};
pub use ids::{CategoryId, TransactionId};
pub use month::Month;
pub use snapshot::LedgerSnapshot;
pub use transaction::{Transaction, TransactionType};
