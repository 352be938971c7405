//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json. Category order is
//! the order categories were created in; breakdown tie-breaks depend on it.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinTrackError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), FinTrackError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.categories;

        tracing::debug!(count = data.len(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = CategoryData {
            categories: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: &CategoryId) -> Result<Option<Category>, FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|c| &c.id == id).cloned())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .iter()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Get all categories in creation order
    pub fn get_all(&self) -> Result<Vec<Category>, FinTrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Insert a new category or replace an existing one in place
    pub fn upsert(&self, category: Category) -> Result<(), FinTrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => data.push(category),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        (temp_dir, CategoryRepository::new(path))
    }

    #[test]
    fn test_upsert_and_lookup() {
        let (_temp_dir, repo) = create_test_repo();
        let pets = Category::new("Pets", CategoryKind::Expense);
        repo.upsert(pets.clone()).unwrap();

        assert_eq!(repo.get(&pets.id).unwrap(), Some(pets.clone()));
        assert_eq!(repo.get_by_name("  pETS ").unwrap(), Some(pets));
        assert!(repo.get_by_name("Travel").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(Category::new("Pets", CategoryKind::Expense)).unwrap();
        repo.upsert(Category::new("Gifts", CategoryKind::Income)).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();
        let all = repo2.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Pets");
        assert!(all[1].is_income());
    }
}
