//! Category service
//!
//! Provides business logic for categories: creating custom categories with a
//! duplicate-name check, and lookup by ID or name. Categories are never
//! deleted.

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Category, CategoryId, CategoryKind};
use crate::storage::LedgerStore;

/// Service for category management
pub struct CategoryService<'a, L: LedgerStore + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: LedgerStore + ?Sized> CategoryService<'a, L> {
    /// Create a new category service
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Create a custom category
    pub fn create(
        &self,
        name: &str,
        kind: CategoryKind,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> FinTrackResult<Category> {
        let name = name.trim();

        if self.get_by_name(name)?.is_some() {
            return Err(FinTrackError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut category = Category::new(name, kind);
        category.icon = icon.unwrap_or(default_icon(kind)).trim().to_string();
        category.color = color.unwrap_or("#64748b").trim().to_string();

        category.validate()?;

        self.ledger.create_category(category.clone())?;
        tracing::info!(id = %category.id, name = %category.name, kind = %category.kind, "created category");

        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: &CategoryId) -> FinTrackResult<Option<Category>> {
        self.ledger.get_category(id)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> FinTrackResult<Option<Category>> {
        let name_lower = name.trim().to_lowercase();
        Ok(self
            .ledger
            .list_categories()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == name_lower))
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> FinTrackResult<Option<Category>> {
        if let Some(category) = self.get_by_name(identifier)? {
            return Ok(Some(category));
        }
        self.ledger.get_category(&CategoryId::from(identifier.trim()))
    }

    /// Find a category or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinTrackResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| FinTrackError::category_not_found(identifier))
    }

    /// List all categories in creation order
    pub fn list(&self) -> FinTrackResult<Vec<Category>> {
        self.ledger.list_categories()
    }

    /// List categories of one kind
    pub fn list_kind(&self, kind: CategoryKind) -> FinTrackResult<Vec<Category>> {
        Ok(self
            .ledger
            .list_categories()?
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect())
    }
}

fn default_icon(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::Income => "💰",
        CategoryKind::Expense => "📦",
    }
}
