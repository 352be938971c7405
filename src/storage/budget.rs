//! Budget limit repository for JSON storage
//!
//! Manages loading and saving the per-category budget map to budgets.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinTrackError;
use crate::models::{BudgetEntry, BudgetMap, BudgetPeriod, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: BudgetMap,
}

/// Repository for budget limit persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<BudgetMap>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(BudgetMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), FinTrackError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *budgets = file_data.budgets;

        tracing::debug!(count = budgets.len(), "loaded budgets");
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), FinTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = BudgetData {
            budgets: budgets.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the full budget map
    pub fn get_all(&self) -> Result<BudgetMap, FinTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.clone())
    }

    /// Get the budget for one category
    pub fn get(&self, category_id: &CategoryId) -> Result<Option<BudgetEntry>, FinTrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(category_id).copied())
    }

    /// Set (or replace) a category's budget
    pub fn set(
        &self,
        category_id: CategoryId,
        limit: f64,
        period: BudgetPeriod,
    ) -> Result<(), FinTrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.set(category_id, limit, period);
        Ok(())
    }

    /// Remove a category's budget, returning it if one existed
    pub fn remove(&self, category_id: &CategoryId) -> Result<Option<BudgetEntry>, FinTrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_replaces_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let repo = BudgetRepository::new(path.clone());
        let food = CategoryId::from("cat_02");

        repo.set(food.clone(), 500.0, BudgetPeriod::Monthly).unwrap();
        repo.set(food.clone(), 650.0, BudgetPeriod::Weekly).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(path);
        repo2.load().unwrap();
        let all = repo2.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get(&food), Some(&BudgetEntry::new(650.0, BudgetPeriod::Weekly)));
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        let food = CategoryId::from("cat_02");

        repo.set(food.clone(), 100.0, BudgetPeriod::Monthly).unwrap();
        assert!(repo.remove(&food).unwrap().is_some());
        assert!(repo.get(&food).unwrap().is_none());
        assert!(repo.remove(&food).unwrap().is_none());
    }
}
