//! Transaction list filter state
//!
//! One `FilterState` describes a list view: which transactions are shown and
//! how they are ordered. The default value means "no filtering", newest first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Transaction type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(FilterParseError(format!("unknown type filter '{}'", other))),
        }
    }
}

/// Category filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    pub fn matches(&self, category_id: &CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == category_id,
        }
    }
}

/// Sort key for the transaction list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Category,
}

impl FromStr for SortKey {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            other => Err(FilterParseError(format!("unknown sort key '{}'", other))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(FilterParseError(format!("unknown sort order '{}'", other))),
        }
    }
}

/// Filter and sort options for the transaction list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Case-insensitive substring of description or category name
    #[serde(default)]
    pub search: String,

    #[serde(default, rename = "type")]
    pub kind: TypeFilter,

    #[serde(default)]
    pub category: CategoryFilter,

    /// Inclusive lower date bound
    #[serde(default)]
    pub date_from: Option<NaiveDate>,

    /// Inclusive upper date bound
    #[serde(default)]
    pub date_to: Option<NaiveDate>,

    #[serde(default)]
    pub sort_by: SortKey,

    #[serde(default)]
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Whether the search dimension is set (whitespace does not count)
    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// Number of filter dimensions that differ from their default
    ///
    /// Sort key and order are not filters and never count.
    pub fn active_count(&self) -> usize {
        [
            self.kind != TypeFilter::All,
            self.category != CategoryFilter::All,
            self.has_search(),
            self.date_from.is_some(),
            self.date_to.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Error parsing a filter option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParseError(pub String);

impl fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid filter: {}", self.0)
    }
}

impl std::error::Error for FilterParseError {}
