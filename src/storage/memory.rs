//! In-memory ledger
//!
//! Implements the ledger and budget collaborator traits without touching the
//! filesystem. Used by tests and by callers that hold the ledger themselves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{
    BudgetEntry, BudgetMap, BudgetPeriod, Category, CategoryId, Transaction, TransactionId,
};

use super::{next_ledger_id, BudgetStore, LedgerSource, LedgerStore};

/// Ledger held entirely in memory
#[derive(Debug)]
pub struct MemoryLedger {
    transactions: RwLock<Vec<Transaction>>,
    categories: RwLock<Vec<Category>>,
    budgets: RwLock<BudgetMap>,
    ledger_id: u64,
    revision: AtomicU64,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self {
            transactions: RwLock::new(Vec::new()),
            categories: RwLock::new(Vec::new()),
            budgets: RwLock::new(BudgetMap::new()),
            ledger_id: next_ledger_id(),
            revision: AtomicU64::new(0),
        }
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-populated with categories and transactions
    pub fn with_data(categories: Vec<Category>, transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            categories: RwLock::new(categories),
            ..Self::default()
        }
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> FinTrackError {
    FinTrackError::Storage(format!("Lock poisoned: {}", e))
}

impl LedgerSource for MemoryLedger {
    fn list_transactions(&self) -> FinTrackResult<Vec<Transaction>> {
        Ok(self.transactions.read().map_err(poisoned)?.clone())
    }

    fn list_categories(&self) -> FinTrackResult<Vec<Category>> {
        Ok(self.categories.read().map_err(poisoned)?.clone())
    }

    fn ledger_id(&self) -> u64 {
        self.ledger_id
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl LedgerStore for MemoryLedger {
    fn get_transaction(&self, id: &TransactionId) -> FinTrackResult<Option<Transaction>> {
        let transactions = self.transactions.read().map_err(poisoned)?;
        Ok(transactions.iter().find(|t| &t.id == id).cloned())
    }

    fn get_category(&self, id: &CategoryId) -> FinTrackResult<Option<Category>> {
        let categories = self.categories.read().map_err(poisoned)?;
        Ok(categories.iter().find(|c| &c.id == id).cloned())
    }

    fn create_transaction(&self, txn: Transaction) -> FinTrackResult<()> {
        {
            let mut transactions = self.transactions.write().map_err(poisoned)?;
            match transactions.iter_mut().find(|t| t.id == txn.id) {
                Some(existing) => *existing = txn,
                None => transactions.push(txn),
            }
        }
        self.bump();
        Ok(())
    }

    fn update_transaction(&self, txn: Transaction) -> FinTrackResult<()> {
        {
            let mut transactions = self.transactions.write().map_err(poisoned)?;
            let existing = transactions
                .iter_mut()
                .find(|t| t.id == txn.id)
                .ok_or_else(|| FinTrackError::transaction_not_found(txn.id.as_str()))?;
            *existing = txn;
        }
        self.bump();
        Ok(())
    }

    fn delete_transaction(&self, id: &TransactionId) -> FinTrackResult<Transaction> {
        let removed = {
            let mut transactions = self.transactions.write().map_err(poisoned)?;
            let index = transactions
                .iter()
                .position(|t| &t.id == id)
                .ok_or_else(|| FinTrackError::transaction_not_found(id.as_str()))?;
            transactions.remove(index)
        };
        self.bump();
        Ok(removed)
    }

    fn create_category(&self, category: Category) -> FinTrackResult<()> {
        {
            let mut categories = self.categories.write().map_err(poisoned)?;
            match categories.iter_mut().find(|c| c.id == category.id) {
                Some(existing) => *existing = category,
                None => categories.push(category),
            }
        }
        self.bump();
        Ok(())
    }
}

impl BudgetStore for MemoryLedger {
    fn budgets(&self) -> FinTrackResult<BudgetMap> {
        Ok(self.budgets.read().map_err(poisoned)?.clone())
    }

    fn set_budget(
        &self,
        category_id: CategoryId,
        limit: f64,
        period: BudgetPeriod,
    ) -> FinTrackResult<()> {
        self.budgets
            .write()
            .map_err(poisoned)?
            .set(category_id, limit, period);
        self.bump();
        Ok(())
    }

    fn remove_budget(&self, category_id: &CategoryId) -> FinTrackResult<Option<BudgetEntry>> {
        let removed = self.budgets.write().map_err(poisoned)?.remove(category_id);
        if removed.is_some() {
            self.bump();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, TransactionType};
    use crate::storage::snapshot;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::new(
            TransactionType::Expense,
            20.0,
            CategoryId::from("cat_02"),
            "Lunch",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_mutations_bump_revision() {
        let ledger = MemoryLedger::with_data(default_categories(), Vec::new());
        assert_eq!(ledger.revision(), 0);

        let txn = sample();
        ledger.create_transaction(txn.clone()).unwrap();
        assert_eq!(ledger.revision(), 1);

        ledger
            .set_budget(CategoryId::from("cat_02"), 100.0, BudgetPeriod::Monthly)
            .unwrap();
        assert_eq!(ledger.revision(), 2);

        ledger.delete_transaction(&txn.id).unwrap();
        assert_eq!(ledger.revision(), 3);

        // Removing a budget that isn't there changes nothing
        ledger.remove_budget(&CategoryId::from("cat_07")).unwrap();
        assert_eq!(ledger.revision(), 3);
    }

    #[test]
    fn test_create_with_existing_id_replaces_in_place() {
        let first = sample();
        let second = Transaction::new(
            TransactionType::Income,
            75.0,
            CategoryId::from("cat_10"),
            "Refund",
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        );
        let ledger = MemoryLedger::with_data(default_categories(), vec![first.clone(), second]);

        let mut replacement = first.clone();
        replacement.amount = 35.0;
        ledger.create_transaction(replacement).unwrap();

        let all = ledger.list_transactions().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].amount, 35.0);
        assert_eq!(ledger.revision(), 1);
    }

    #[test]
    fn test_ledgers_have_distinct_ids() {
        let a = MemoryLedger::new();
        let b = MemoryLedger::new();
        assert_ne!(a.ledger_id(), b.ledger_id());
        assert_eq!(snapshot(&a).unwrap().ledger_id, a.ledger_id());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let ledger = MemoryLedger::new();
        let err = ledger.update_transaction(sample()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_snapshot_reflects_ledger() {
        let ledger = MemoryLedger::with_data(default_categories(), vec![sample()]);
        ledger
            .set_budget(CategoryId::from("cat_02"), 50.0, BudgetPeriod::Monthly)
            .unwrap();

        let snap = snapshot(&ledger).unwrap();
        assert_eq!(snap.revision, 1);
        assert_eq!(snap.transactions.len(), 1);
        assert_eq!(snap.categories.len(), 12);
        assert_eq!(snap.budgets.len(), 1);
    }
}
