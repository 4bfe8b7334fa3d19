//! Search/list table
//!
//! One column per schema field plus an operations column. The table turns
//! user gestures into `TableEvent`s; deletes go through a confirmation
//! step first and a declined confirmation emits nothing.

use crate::resolve::{DisplayDirective, render_display};
use smallcrud_core::{SortOrder, TypeDescriptor};
use smallcrud_schema::{PageSpec, Record, Schema, SortSpec};
use std::sync::Arc;

/// Header of the operations column
pub const OPERATIONS_LABEL: &str = "Operations";

/// Confirmation prompt shown before deleting
pub const DELETE_PROMPT: &str = "Are you sure to delete this?";

/// One data column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub label: String,
    pub ty: TypeDescriptor,
    pub sortable: bool,
}

/// Actions of the operations column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Detail,
    Edit,
    Delete,
}

impl RowAction {
    /// Get all actions in button order
    pub fn all() -> &'static [RowAction] {
        &[RowAction::Detail, RowAction::Edit, RowAction::Delete]
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RowAction::Detail => "Detail",
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }
}

/// Events emitted by the table
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    Detail(Record),
    Edit(Record),
    Delete(Record),
    RowClick(Record),
    PageChange(PageSpec),
    SortChange(SortSpec),
}

/// Headless search table for one schema
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTable {
    schema: Arc<Schema>,
    pending_delete: Option<Record>,
}

impl SearchTable {
    /// Create a table for `schema`
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            pending_delete: None,
        }
    }

    /// Data columns in schema order
    pub fn columns(&self) -> Vec<Column> {
        self.schema
            .fields
            .iter()
            .map(|f| Column {
                name: f.name.clone(),
                label: f.display_label().to_string(),
                ty: f.ty.clone(),
                sortable: f.is_custom_sortable(),
            })
            .collect()
    }

    /// Cells of one row, aligned with `columns()`
    pub fn cells(&self, record: &Record) -> Vec<DisplayDirective> {
        self.schema
            .fields
            .iter()
            .map(|f| render_display(&f.ty, record.get(&f.name)))
            .collect()
    }

    /// Check if the table emits sort changes
    pub fn emits_sort(&self) -> bool {
        self.schema.has_custom_sort()
    }

    /// Page change for a 1-based page index
    pub fn page_change(&self, page_index: u64, page_size: u64) -> TableEvent {
        TableEvent::PageChange(PageSpec::for_page(page_index, page_size))
    }

    /// Sort change on a column; `None` when the schema has no custom sort
    pub fn sort_change(&self, name: &str, order: Option<SortOrder>) -> Option<TableEvent> {
        if !self.emits_sort() {
            return None;
        }
        Some(TableEvent::SortChange(SortSpec {
            name: Some(name.to_string()),
            order,
        }))
    }

    /// Row click
    pub fn row_click(&self, record: &Record) -> TableEvent {
        TableEvent::RowClick(record.clone())
    }

    /// Operations column button; delete only asks for confirmation
    pub fn action(&mut self, action: RowAction, record: &Record) -> Option<TableEvent> {
        match action {
            RowAction::Detail => Some(TableEvent::Detail(record.clone())),
            RowAction::Edit => Some(TableEvent::Edit(record.clone())),
            RowAction::Delete => {
                self.pending_delete = Some(record.clone());
                None
            }
        }
    }

    /// Record awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&Record> {
        self.pending_delete.as_ref()
    }

    /// Confirm the pending delete
    pub fn confirm_delete(&mut self) -> Option<TableEvent> {
        self.pending_delete.take().map(TableEvent::Delete)
    }

    /// Decline the pending delete
    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }
}

/// Number of pages needed for `count` records
pub fn page_count(count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}
