//! Category model
//!
//! Categories label transactions for breakdowns and budgets. Each category
//! carries an explicit kind: income categories collect earnings, expense
//! categories collect spending and are the only ones that can be budgeted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Which side of the ledger a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(CategoryValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Display glyph
    #[serde(default)]
    pub icon: String,

    /// Display accent color (e.g. "#6366f1")
    #[serde(default)]
    pub color: String,

    /// Income or expense category
    #[serde(default)]
    pub kind: CategoryKind,
}

impl Category {
    /// Create a new category with a fresh ID
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: String::new(),
            color: String::new(),
            kind,
        }
    }

    /// Create a category with a fixed ID and display attributes
    pub fn with_id(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        kind: CategoryKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == CategoryKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == CategoryKind::Expense
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icon.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.icon, self.name)
        }
    }
}

/// The categories every new ledger starts with
pub fn default_categories() -> Vec<Category> {
    use CategoryKind::{Expense, Income};

    [
        ("cat_01", "Housing", "🏠", "#6366f1", Expense),
        ("cat_02", "Food & Dining", "🍔", "#f59e0b", Expense),
        ("cat_03", "Transport", "🚗", "#3b82f6", Expense),
        ("cat_04", "Shopping", "🛍️", "#ec4899", Expense),
        ("cat_05", "Healthcare", "💊", "#10b981", Expense),
        ("cat_06", "Entertainment", "🎬", "#8b5cf6", Expense),
        ("cat_07", "Utilities", "⚡", "#f97316", Expense),
        ("cat_08", "Salary", "💼", "#22c55e", Income),
        ("cat_09", "Freelance", "💻", "#14b8a6", Income),
        ("cat_10", "Investments", "📈", "#06b6d4", Income),
        ("cat_11", "Education", "📚", "#a855f7", Expense),
        ("cat_12", "Subscriptions", "📱", "#64748b", Expense),
    ]
    .into_iter()
    .map(|(id, name, icon, color, kind)| Category::with_id(id, name, icon, color, kind))
    .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    UnknownKind(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::UnknownKind(kind) => {
                write!(f, "Unknown category kind '{}' (expected income or expense)", kind)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Pets", CategoryKind::Expense);
        assert_eq!(category.name, "Pets");
        assert!(category.is_expense());
        assert!(!category.is_income());
        assert!(category.id.as_str().starts_with("cat_"));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", CategoryKind::Income);
        assert!(category.validate().is_ok());

        category.name = "  ".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_default_categories_partition() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 12);

        let income: Vec<_> = defaults
            .iter()
            .filter(|c| c.is_income())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(income, vec!["Salary", "Freelance", "Investments"]);
    }

    #[test]
    fn test_kind_defaults_to_expense_when_absent() {
        let json = r#"{"id":"cat_99","name":"Custom"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert!(category.is_expense());
        assert!(category.icon.is_empty());
    }
}
