//! Budget service
//!
//! Sets and removes per-category spending limits. Only expense categories are
//! budgetable; the budget map itself is a plain keyed update.

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{BudgetEntry, BudgetMap, BudgetPeriod, CategoryId};
use crate::storage::{BudgetStore, LedgerStore};

/// Service for budget limit management
pub struct BudgetService<'a, S: LedgerStore + BudgetStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + BudgetStore + ?Sized> BudgetService<'a, S> {
    /// Create a new budget service
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Set (or replace) the limit for an expense category
    pub fn set(
        &self,
        category_id: &CategoryId,
        limit: f64,
        period: BudgetPeriod,
    ) -> FinTrackResult<BudgetEntry> {
        let category = self
            .store
            .get_category(category_id)?
            .ok_or_else(|| FinTrackError::category_not_found(category_id.as_str()))?;

        if category.is_income() {
            return Err(FinTrackError::income_category_budget(&category.name));
        }

        let entry = BudgetEntry::new(limit, period);
        entry.validate()?;

        self.store.set_budget(category_id.clone(), limit, period)?;
        tracing::info!(category = %category.name, limit, %period, "set budget");

        Ok(entry)
    }

    /// Remove a category's limit
    pub fn remove(&self, category_id: &CategoryId) -> FinTrackResult<BudgetEntry> {
        let removed = self
            .store
            .remove_budget(category_id)?
            .ok_or_else(|| FinTrackError::budget_not_found(category_id.as_str()))?;
        tracing::info!(category = %category_id, "removed budget");
        Ok(removed)
    }

    /// All limits, keyed by category
    pub fn list(&self) -> FinTrackResult<BudgetMap> {
        self.store.budgets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_categories;
    use crate::storage::{LedgerSource, MemoryLedger};

    fn ledger() -> MemoryLedger {
        MemoryLedger::with_data(default_categories(), Vec::new())
    }

    #[test]
    fn test_set_and_replace() {
        let ledger = ledger();
        let service = BudgetService::new(&ledger);
        let food = CategoryId::from("cat_02");

        service.set(&food, 500.0, BudgetPeriod::Monthly).unwrap();
        service.set(&food, 600.0, BudgetPeriod::Weekly).unwrap();

        let budgets = service.list().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets.get(&food), Some(&BudgetEntry::new(600.0, BudgetPeriod::Weekly)));
    }

    #[test]
    fn test_income_category_rejected() {
        let ledger = ledger();
        let service = BudgetService::new(&ledger);
        let before = ledger.revision();

        let err = service
            .set(&CategoryId::from("cat_08"), 100.0, BudgetPeriod::Monthly)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.revision(), before);
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let ledger = ledger();
        let service = BudgetService::new(&ledger);
        let food = CategoryId::from("cat_02");

        assert!(service.set(&food, 0.0, BudgetPeriod::Monthly).unwrap_err().is_validation());
        assert!(service.set(&food, -1.0, BudgetPeriod::Monthly).unwrap_err().is_validation());
        assert!(service
            .set(&food, f64::INFINITY, BudgetPeriod::Monthly)
            .unwrap_err()
            .is_validation());
        assert!(service
            .set(&CategoryId::from("cat_99"), 10.0, BudgetPeriod::Monthly)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_remove() {
        let ledger = ledger();
        let service = BudgetService::new(&ledger);
        let food = CategoryId::from("cat_02");

        service.set(&food, 500.0, BudgetPeriod::Monthly).unwrap();
        assert_eq!(service.remove(&food).unwrap().limit, 500.0);
        assert!(service.remove(&food).unwrap_err().is_not_found());
    }
}
