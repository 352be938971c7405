//! Transaction service
//!
//! Provides business logic for transaction management: validated creation,
//! in-place edits that preserve the ID, and deletion. Every mutation goes
//! through the ledger collaborator, which bumps the ledger revision.

use chrono::NaiveDate;

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{CategoryId, CurrencyCode, Transaction, TransactionId, TransactionType};
use crate::storage::LedgerStore;

/// Service for transaction management
pub struct TransactionService<'a, L: LedgerStore + ?Sized> {
    ledger: &'a L,
    base_currency: CurrencyCode,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub amount: f64,
    pub category_id: CategoryId,
    pub description: String,
    pub date: NaiveDate,
    /// Defaults to the service's base currency
    pub currency: Option<CurrencyCode>,
    pub notes: Option<String>,
}

/// Changes to apply to an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub currency: Option<CurrencyCode>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.category_id.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.currency.is_none()
            && self.notes.is_none()
    }
}

impl<'a, L: LedgerStore + ?Sized> TransactionService<'a, L> {
    /// Create a new transaction service
    pub fn new(ledger: &'a L, base_currency: CurrencyCode) -> Self {
        Self {
            ledger,
            base_currency,
        }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FinTrackResult<Transaction> {
        self.require_category(&input.category_id)?;

        let mut txn = Transaction::new(
            input.kind,
            input.amount,
            input.category_id,
            input.description.trim(),
            input.date,
        )
        .with_currency(input.currency.unwrap_or_else(|| self.base_currency.clone()));
        txn.notes = clean_notes(input.notes);

        txn.validate()?;

        self.ledger.create_transaction(txn.clone())?;
        tracing::info!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "created transaction");

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: &TransactionId) -> FinTrackResult<Option<Transaction>> {
        self.ledger.get_transaction(id)
    }

    /// Find a transaction by full ID or unambiguous ID prefix
    pub fn find(&self, identifier: &str) -> FinTrackResult<Option<Transaction>> {
        let identifier = identifier.trim();
        if let Some(txn) = self.ledger.get_transaction(&TransactionId::from(identifier))? {
            return Ok(Some(txn));
        }

        let mut matches = self
            .ledger
            .list_transactions()?
            .into_iter()
            .filter(|t| t.id.as_str().starts_with(identifier));

        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn)),
            (Some(_), Some(_)) => Err(FinTrackError::ambiguous_transaction_id(identifier)),
            _ => Ok(None),
        }
    }

    /// List all transactions in ledger order
    pub fn list(&self) -> FinTrackResult<Vec<Transaction>> {
        self.ledger.list_transactions()
    }

    /// Apply an edit in place; the ID never changes
    pub fn update(
        &self,
        id: &TransactionId,
        changes: UpdateTransactionInput,
    ) -> FinTrackResult<Transaction> {
        let mut txn = self
            .ledger
            .get_transaction(id)?
            .ok_or_else(|| FinTrackError::transaction_not_found(id.as_str()))?;

        if let Some(kind) = changes.kind {
            txn.kind = kind;
        }
        if let Some(amount) = changes.amount {
            txn.amount = amount;
        }
        if let Some(category_id) = changes.category_id {
            self.require_category(&category_id)?;
            txn.category_id = category_id;
        }
        if let Some(description) = changes.description {
            txn.description = description.trim().to_string();
        }
        if let Some(date) = changes.date {
            txn.date = date;
        }
        if let Some(currency) = changes.currency {
            txn.currency = currency;
        }
        if let Some(notes) = changes.notes {
            txn.notes = clean_notes(notes);
        }

        txn.validate()?;

        self.ledger.update_transaction(txn.clone())?;
        tracing::info!(id = %txn.id, "updated transaction");

        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: &TransactionId) -> FinTrackResult<Transaction> {
        let removed = self.ledger.delete_transaction(id)?;
        tracing::info!(id = %removed.id, "deleted transaction");
        Ok(removed)
    }

    fn require_category(&self, category_id: &CategoryId) -> FinTrackResult<()> {
        if category_id.as_str().trim().is_empty() {
            return Err(FinTrackError::Validation("Please select a category".into()));
        }
        self.ledger
            .get_category(category_id)?
            .ok_or_else(|| FinTrackError::category_not_found(category_id.as_str()))?;
        Ok(())
    }
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_categories;
    use crate::storage::{LedgerSource, MemoryLedger};

    fn ledger() -> MemoryLedger {
        MemoryLedger::with_data(default_categories(), Vec::new())
    }

    fn input(amount: f64, description: &str) -> CreateTransactionInput {
        CreateTransactionInput {
            kind: TransactionType::Expense,
            amount,
            category_id: CategoryId::from("cat_02"),
            description: description.into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            currency: None,
            notes: Some("  ".into()),
        }
    }

    #[test]
    fn test_create_defaults_currency() {
        let ledger = ledger();
        let service = TransactionService::new(&ledger, CurrencyCode::new("EUR"));

        let txn = service.create(input(12.5, "  Lunch ")).unwrap();
        assert_eq!(txn.currency.as_str(), "EUR");
        assert_eq!(txn.description, "Lunch");
        assert_eq!(txn.notes, None);
        assert_eq!(ledger.list_transactions().unwrap().len(), 1);
    }

    #[test]
    fn test_create_validation() {
        let ledger = ledger();
        let service = TransactionService::new(&ledger, CurrencyCode::default());

        assert!(service.create(input(0.0, "Lunch")).unwrap_err().is_validation());
        assert!(service.create(input(-5.0, "Lunch")).unwrap_err().is_validation());
        assert!(service.create(input(f64::NAN, "Lunch")).unwrap_err().is_validation());
        assert!(service.create(input(5.0, "   ")).unwrap_err().is_validation());

        let mut unknown = input(5.0, "Lunch");
        unknown.category_id = CategoryId::from("cat_99");
        assert!(service.create(unknown).unwrap_err().is_not_found());

        assert!(ledger.list_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_update_preserves_id_and_position() {
        let ledger = ledger();
        let service = TransactionService::new(&ledger, CurrencyCode::default());
        let first = service.create(input(10.0, "First")).unwrap();
        service.create(input(20.0, "Second")).unwrap();

        let updated = service
            .update(
                &first.id,
                UpdateTransactionInput {
                    amount: Some(15.0),
                    kind: Some(TransactionType::Income),
                    category_id: Some(CategoryId::from("cat_09")),
                    notes: Some(Some("invoice #12".into())),
                    ..UpdateTransactionInput::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, first.id);
        let all = service.list().unwrap();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].amount, 15.0);
        assert!(all[0].is_income());
        assert_eq!(all[0].notes.as_deref(), Some("invoice #12"));
    }

    #[test]
    fn test_update_rejects_invalid_amount() {
        let ledger = ledger();
        let service = TransactionService::new(&ledger, CurrencyCode::default());
        let txn = service.create(input(10.0, "First")).unwrap();

        let err = service
            .update(
                &txn.id,
                UpdateTransactionInput {
                    amount: Some(0.0),
                    ..UpdateTransactionInput::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(&txn.id).unwrap().unwrap().amount, 10.0);
    }

    #[test]
    fn test_find_by_prefix_and_delete() {
        let ledger = ledger();
        let service = TransactionService::new(&ledger, CurrencyCode::default());
        let txn = service.create(input(10.0, "Only")).unwrap();

        let prefix = &txn.id.as_str()[..10];
        assert_eq!(service.find(prefix).unwrap().map(|t| t.id), Some(txn.id.clone()));
        assert!(service.find("txn_nothing").unwrap().is_none());

        service.delete(&txn.id).unwrap();
        assert!(service.get(&txn.id).unwrap().is_none());
        assert!(service.delete(&txn.id).unwrap_err().is_not_found());
    }
}
