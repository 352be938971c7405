//! Ledger snapshot
//!
//! Every derivation reads from a snapshot: an immutable copy of the ledger
//! taken at one revision. Derived views never hold on to ledger state beyond
//! the snapshot they were computed from.

use std::collections::HashMap;

use super::budget::BudgetMap;
use super::category::Category;
use super::ids::CategoryId;
use super::transaction::Transaction;

/// The ledger as of one revision
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    /// Identity of the ledger this snapshot was taken from
    pub ledger_id: u64,
    /// Revision of the ledger this snapshot was taken at
    pub revision: u64,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: BudgetMap,
}

impl LedgerSnapshot {
    pub fn new(
        revision: u64,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        budgets: BudgetMap,
    ) -> Self {
        Self {
            ledger_id: 0,
            revision,
            transactions,
            categories,
            budgets,
        }
    }

    /// Tag the snapshot with the ledger it came from
    pub fn with_ledger_id(mut self, ledger_id: u64) -> Self {
        self.ledger_id = ledger_id;
        self
    }

    /// Category lookup by ID
    pub fn category_index(&self) -> HashMap<&CategoryId, &Category> {
        category_index(&self.categories)
    }
}

/// Build a category lookup by ID
pub fn category_index(categories: &[Category]) -> HashMap<&CategoryId, &Category> {
    categories.iter().map(|c| (&c.id, c)).collect()
}
