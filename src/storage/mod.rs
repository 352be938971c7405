//! Storage layer for FinTrack
//!
//! Provides JSON file storage with atomic writes, plus the collaborator
//! traits the services and the derivation engine read the ledger through.
//! Every mutation bumps a revision counter; derived views are memoized
//! against that revision.

pub mod budget;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod memory;
pub mod transactions;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use memory::MemoryLedger;
pub use transactions::TransactionRepository;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::paths::FinTrackPaths;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{
    BudgetEntry, BudgetMap, BudgetPeriod, Category, CategoryId, LedgerSnapshot, Transaction,
    TransactionId,
};

/// Read access to the ledger
pub trait LedgerSource {
    fn list_transactions(&self) -> FinTrackResult<Vec<Transaction>>;
    fn list_categories(&self) -> FinTrackResult<Vec<Category>>;
    /// Distinguishes ledger instances; stable for the lifetime of one
    fn ledger_id(&self) -> u64;
    /// Changes whenever the ledger or budgets change
    fn revision(&self) -> u64;
}

static NEXT_LEDGER_ID: AtomicU64 = AtomicU64::new(1);

/// Mint an identity for a new ledger instance
pub fn next_ledger_id() -> u64 {
    NEXT_LEDGER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Ledger mutations
pub trait LedgerStore: LedgerSource {
    fn get_transaction(&self, id: &TransactionId) -> FinTrackResult<Option<Transaction>>;
    fn get_category(&self, id: &CategoryId) -> FinTrackResult<Option<Category>>;
    fn create_transaction(&self, txn: Transaction) -> FinTrackResult<()>;
    /// Replace a transaction in place, keeping its ID and ledger position
    fn update_transaction(&self, txn: Transaction) -> FinTrackResult<()>;
    fn delete_transaction(&self, id: &TransactionId) -> FinTrackResult<Transaction>;
    fn create_category(&self, category: Category) -> FinTrackResult<()>;
}

/// Budget limits keyed by category
pub trait BudgetStore {
    fn budgets(&self) -> FinTrackResult<BudgetMap>;
    fn set_budget(
        &self,
        category_id: CategoryId,
        limit: f64,
        period: BudgetPeriod,
    ) -> FinTrackResult<()>;
    fn remove_budget(&self, category_id: &CategoryId) -> FinTrackResult<Option<BudgetEntry>>;
}

/// Take a snapshot of everything the derivation engine reads
pub fn snapshot<S>(store: &S) -> FinTrackResult<LedgerSnapshot>
where
    S: LedgerSource + BudgetStore + ?Sized,
{
    Ok(LedgerSnapshot::new(
        store.revision(),
        store.list_transactions()?,
        store.list_categories()?,
        store.budgets()?,
    )
    .with_ledger_id(store.ledger_id()))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinTrackPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    ledger_id: u64,
    revision: AtomicU64,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinTrackPaths) -> Result<Self, FinTrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
            ledger_id: next_ledger_id(),
            revision: AtomicU64::new(0),
        })
    }

    /// Open storage, seeding defaults on first use, and load everything
    pub fn open(paths: FinTrackPaths) -> Result<Self, FinTrackError> {
        initialize_storage(&paths)?;
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinTrackPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FinTrackError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.budgets.load()?;
        self.bump();
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinTrackError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

impl LedgerSource for Storage {
    fn list_transactions(&self) -> FinTrackResult<Vec<Transaction>> {
        self.transactions.get_all()
    }

    fn list_categories(&self) -> FinTrackResult<Vec<Category>> {
        self.categories.get_all()
    }

    fn ledger_id(&self) -> u64 {
        self.ledger_id
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl LedgerStore for Storage {
    fn get_transaction(&self, id: &TransactionId) -> FinTrackResult<Option<Transaction>> {
        self.transactions.get(id)
    }

    fn get_category(&self, id: &CategoryId) -> FinTrackResult<Option<Category>> {
        self.categories.get(id)
    }

    fn create_transaction(&self, txn: Transaction) -> FinTrackResult<()> {
        self.transactions.upsert(txn)?;
        self.transactions.save()?;
        self.bump();
        Ok(())
    }

    fn update_transaction(&self, txn: Transaction) -> FinTrackResult<()> {
        if self.transactions.get(&txn.id)?.is_none() {
            return Err(FinTrackError::transaction_not_found(txn.id.as_str()));
        }
        self.transactions.upsert(txn)?;
        self.transactions.save()?;
        self.bump();
        Ok(())
    }

    fn delete_transaction(&self, id: &TransactionId) -> FinTrackResult<Transaction> {
        let removed = self
            .transactions
            .delete(id)?
            .ok_or_else(|| FinTrackError::transaction_not_found(id.as_str()))?;
        self.transactions.save()?;
        self.bump();
        Ok(removed)
    }

    fn create_category(&self, category: Category) -> FinTrackResult<()> {
        self.categories.upsert(category)?;
        self.categories.save()?;
        self.bump();
        Ok(())
    }
}

impl BudgetStore for Storage {
    fn budgets(&self) -> FinTrackResult<BudgetMap> {
        self.budgets.get_all()
    }

    fn set_budget(
        &self,
        category_id: CategoryId,
        limit: f64,
        period: BudgetPeriod,
    ) -> FinTrackResult<()> {
        self.budgets.set(category_id, limit, period)?;
        self.budgets.save()?;
        self.bump();
        Ok(())
    }

    fn remove_budget(&self, category_id: &CategoryId) -> FinTrackResult<Option<BudgetEntry>> {
        let removed = self.budgets.remove(category_id)?;
        if removed.is_some() {
            self.budgets.save()?;
            self.bump();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_open_seeds_categories() {
        let (_temp_dir, storage) = open_temp();
        assert_eq!(storage.list_categories().unwrap().len(), 12);
    }

    #[test]
    fn test_mutations_persist_and_bump_revision() {
        let (temp_dir, storage) = open_temp();
        let before = storage.revision();

        let txn = Transaction::new(
            TransactionType::Income,
            2500.0,
            CategoryId::from("cat_08"),
            "Salary",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        storage.create_transaction(txn.clone()).unwrap();
        storage
            .set_budget(CategoryId::from("cat_02"), 400.0, BudgetPeriod::Monthly)
            .unwrap();
        assert_eq!(storage.revision(), before + 2);

        let reopened =
            Storage::open(FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let snap = snapshot(&reopened).unwrap();
        assert_eq!(snap.transactions, vec![txn]);
        assert_eq!(snap.budgets.len(), 1);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_temp_dir, storage) = open_temp();
        let err = storage
            .delete_transaction(&TransactionId::from("txn_nope"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
