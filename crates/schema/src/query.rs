//! Structured search queries
//!
//! A `Query` is an immutable value. Every change produces a new query
//! through one of the `with_*` merge functions, and fragments accumulate:
//! changing the page keeps the current filter and sort, and so on.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallcrud_core::{Operator, SortOrder};

// ============================================================================
// Predicate
// ============================================================================

/// One filter row; all predicates of a query are ANDed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Field name
    pub name: String,
    /// Comparison
    #[serde(default)]
    pub operator: Operator,
    /// Operand
    #[serde(default)]
    pub value: Value,
}

impl Predicate {
    /// Create a new predicate
    pub fn new(name: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            name: name.into(),
            operator,
            value,
        }
    }

    /// Equality predicate
    pub fn eq(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, Operator::Eq, value)
    }

    /// Empty row as seeded by the filter builder
    pub fn blank() -> Self {
        Self::new("", Operator::Eq, Value::String(String::new()))
    }

    /// Check if the row names a field
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

// ============================================================================
// Sort / Page
// ============================================================================

/// Sort request; only applied when both parts are set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub name: Option<String>,
    pub order: Option<SortOrder>,
}

impl SortSpec {
    /// Sort on a field in the given direction
    pub fn by(name: impl Into<String>, order: SortOrder) -> Self {
        Self {
            name: Some(name.into()),
            order: Some(order),
        }
    }

    /// The field and direction, when both are set
    pub fn resolved(&self) -> Option<(&str, SortOrder)> {
        match (self.name.as_deref(), self.order) {
            (Some(name), Some(order)) if !name.is_empty() => Some((name, order)),
            _ => None,
        }
    }
}

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub limit: u64,
    pub offset: u64,
}

impl PageSpec {
    /// Window for a 1-based page index; index 0 is treated as page 1
    ///
    /// The offset saturates at `u64::MAX` for out-of-range pages.
    pub fn for_page(page_index: u64, page_size: u64) -> Self {
        Self {
            limit: page_size,
            offset: page_index.saturating_sub(1).saturating_mul(page_size),
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// Filter, sort and pagination state of a search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub filter: Vec<Predicate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageSpec>,
}

impl Query {
    /// The empty query issued on mount
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filter, keeping sort and page
    pub fn with_filter(&self, filter: Vec<Predicate>) -> Self {
        Self {
            filter,
            ..self.clone()
        }
    }

    /// Replace the sort, keeping filter and page
    pub fn with_sort(&self, sort: SortSpec) -> Self {
        Self {
            sort: Some(sort),
            ..self.clone()
        }
    }

    /// Replace the page, keeping filter and sort
    pub fn with_page(&self, page: PageSpec) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageResult {
    /// Records of the current page
    #[serde(default)]
    pub data: Vec<Record>,
    /// Total number of matching records
    #[serde(default)]
    pub count: u64,
}
