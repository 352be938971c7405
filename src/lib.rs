//! FinTrack - personal income/expense ledger
//!
//! This library provides the core of the FinTrack ledger: recording income
//! and expense transactions, and deriving filtered lists, multi-month
//! analytics, budget status and a dashboard overview from them, all
//! normalized into a chosen display currency.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, filters)
//! - `storage`: JSON file storage and the ledger collaborator traits
//! - `services`: Validation, lookups, currency conversion, month windows
//! - `reports`: Pure derived views of a ledger snapshot
//! - `cache`: Revision-keyed memoization of the derived views
//! - `export`: CSV export of the transaction list
//! - `cli`: clap command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{paths::FinTrackPaths, settings::Settings};
//! use fintrack::storage::{self, Storage};
//! use fintrack::cache::DerivationCache;
//!
//! let paths = FinTrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let cache = DerivationCache::default();
//!
//! let snapshot = storage::snapshot(&storage)?;
//! let report = cache.analytics(&snapshot, &settings.display_currency, 6, today);
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinTrackError, FinTrackResult};
