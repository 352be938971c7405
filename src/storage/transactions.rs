//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Ledger order
//! is insertion order and survives a save/load cycle; edits keep a
//! transaction's position.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinTrackError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), FinTrackError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.transactions;

        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = TransactionData {
            transactions: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| &t.id == id).cloned())
    }

    /// Get all transactions in ledger order
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Insert a new transaction or replace an existing one in place
    pub fn upsert(&self, txn: Transaction) -> Result<(), FinTrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|t| t.id == txn.id) {
            Some(existing) => *existing = txn,
            None => data.push(txn),
        }
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: &TransactionId) -> Result<Option<Transaction>, FinTrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data
            .iter()
            .position(|t| &t.id == id)
            .map(|index| data.remove(index)))
    }

    /// Number of transactions
    pub fn count(&self) -> Result<usize, FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn sample(desc: &str) -> Transaction {
        Transaction::new(
            TransactionType::Expense,
            12.0,
            CategoryId::from("cat_02"),
            desc,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_keeps_position() {
        let (_temp_dir, repo) = create_test_repo();
        let first = sample("first");
        let second = sample("second");
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second).unwrap();

        let mut edited = first.clone();
        edited.description = "first, edited".into();
        repo.upsert(edited).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].description, "first, edited");
    }

    #[test]
    fn test_save_and_reload_preserves_order() {
        let (temp_dir, repo) = create_test_repo();
        let names = ["a", "b", "c"];
        for name in names {
            repo.upsert(sample(name)).unwrap();
        }
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();
        let loaded: Vec<_> = repo2
            .get_all()
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(loaded, names);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = sample("gone");
        repo.upsert(txn.clone()).unwrap();

        assert!(repo.delete(&txn.id).unwrap().is_some());
        assert!(repo.get(&txn.id).unwrap().is_none());
        assert!(repo.delete(&txn.id).unwrap().is_none());
    }

    #[test]
    fn test_missing_currency_loads_as_usd() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("transactions.json"),
            r#"{"transactions":[{"id":"txn_001","type":"expense","amount":9.5,
                "categoryId":"cat_02","description":"Coffee","date":"2025-06-01"}]}"#,
        )
        .unwrap();

        repo.load().unwrap();
        let all = repo.get_all().unwrap();
        assert_eq!(all[0].currency.as_str(), "USD");
        assert_eq!(all[0].id.as_str(), "txn_001");
    }
}
