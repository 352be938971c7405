//! Budget limit model
//!
//! A budget is a spending limit attached to one expense category. The map of
//! limits is keyed by category ID, so each category has at most one entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// How often a budget limit resets
///
/// Only monthly budgets are windowed by the status calculator; weekly limits
/// are stored and shown, but still measured against the calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = BudgetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "weekly" | "week" => Ok(Self::Weekly),
            other => Err(BudgetValidationError::UnknownPeriod(other.to_string())),
        }
    }
}

/// A spending limit for a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Maximum spend per period, in the units transactions are entered in
    pub limit: f64,

    #[serde(default)]
    pub period: BudgetPeriod,
}

impl BudgetEntry {
    pub fn new(limit: f64, period: BudgetPeriod) -> Self {
        Self { limit, period }
    }

    pub fn monthly(limit: f64) -> Self {
        Self::new(limit, BudgetPeriod::Monthly)
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }
        Ok(())
    }
}

impl fmt::Display for BudgetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.limit, self.period)
    }
}

/// All budget limits, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetMap(BTreeMap<CategoryId, BudgetEntry>);

impl BudgetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the limit for a category
    pub fn set(&mut self, category_id: CategoryId, limit: f64, period: BudgetPeriod) {
        self.0.insert(category_id, BudgetEntry::new(limit, period));
    }

    /// Remove the limit for a category, returning it if present
    pub fn remove(&mut self, category_id: &CategoryId) -> Option<BudgetEntry> {
        self.0.remove(category_id)
    }

    pub fn get(&self, category_id: &CategoryId) -> Option<&BudgetEntry> {
        self.0.get(category_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &BudgetEntry)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CategoryId, BudgetEntry)> for BudgetMap {
    fn from_iter<I: IntoIterator<Item = (CategoryId, BudgetEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    NonPositiveLimit(f64),
    UnknownPeriod(String),
    IncomeCategory(String),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be greater than 0 (got {})", limit)
            }
            Self::UnknownPeriod(p) => {
                write!(f, "Unknown budget period '{}' (expected monthly or weekly)", p)
            }
            Self::IncomeCategory(name) => {
                write!(f, "'{}' is an income category and cannot be budgeted", name)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
