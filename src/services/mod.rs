//! Service layer for FinTrack
//!
//! The service layer provides business logic on top of the storage
//! collaborators (validation, defaulting, lookups), plus the currency and
//! period helpers the derivation engine is built on.

pub mod budget;
pub mod category;
pub mod currency;
pub mod period;
pub mod transaction;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use currency::CurrencyConverter;
pub use period::{month_window, MonthBucket};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
