//! Export module for FinTrack
//!
//! CSV export of the filtered, sorted transaction list.

pub mod csv;

pub use self::csv::{export_file_name, export_transactions_csv};
