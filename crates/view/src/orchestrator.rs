//! # CRUD Orchestrator
//!
//! Owns the screen state of one schema and drives the processors.
//!
//! ## Features
//!
//! - **Persistent query**: page, sort and filter fragments accumulate
//! - **Four dialogs**: create, edit, read and filter open independently
//! - **Sequenced searches**: a completion older than the latest issued
//!   search is discarded
//! - **Best-effort recovery**: failures go to an `ErrorSink`, transitions
//!   always complete
//!
//! The state lives behind a `StateHandle` so the desktop UI can keep it in
//! a signal while tests keep it in a mutex.

use crate::processors::CrudProcessors;
use crate::sink::ErrorSink;
use crate::table::TableEvent;
use smallcrud_core::{CrudError, CrudResult};
use smallcrud_schema::{PageResult, PageSpec, Predicate, Query, Record, SortSpec};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

// ============================================================================
// Dialogs
// ============================================================================

/// The four dialogs of a CRUD screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Create,
    Edit,
    Read,
    Filter,
}

impl Dialog {
    /// Get all dialogs
    pub fn all() -> &'static [Dialog] {
        &[Dialog::Create, Dialog::Edit, Dialog::Read, Dialog::Filter]
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialog::Create => "Create",
            Dialog::Edit => "Edit",
            Dialog::Read => "Detail",
            Dialog::Filter => "Filter",
        }
    }
}

/// Visibility of each dialog; several may be open at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialogState {
    pub create: bool,
    pub edit: bool,
    pub read: bool,
    pub filter: bool,
}

impl DialogState {
    /// Check if `dialog` is open
    pub fn is_open(&self, dialog: Dialog) -> bool {
        *self.slot(dialog)
    }

    fn set(&mut self, dialog: Dialog, open: bool) {
        *self.slot_mut(dialog) = open;
    }

    fn slot(&self, dialog: Dialog) -> &bool {
        match dialog {
            Dialog::Create => &self.create,
            Dialog::Edit => &self.edit,
            Dialog::Read => &self.read,
            Dialog::Filter => &self.filter,
        }
    }

    fn slot_mut(&mut self, dialog: Dialog) -> &mut bool {
        match dialog {
            Dialog::Create => &mut self.create,
            Dialog::Edit => &mut self.edit,
            Dialog::Read => &mut self.read,
            Dialog::Filter => &mut self.filter,
        }
    }
}

// ============================================================================
// State
// ============================================================================

/// An issued search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: Query,
}

/// What became of a search completion
#[derive(Debug)]
pub enum SearchOutcome {
    /// Result stored
    Applied,
    /// Latest search failed; the previous page is kept
    Failed(CrudError),
    /// A newer search was issued meanwhile
    Stale,
}

/// Screen state of one schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrudState {
    query: Query,
    page: PageResult,
    current: Option<Record>,
    dialogs: DialogState,
    issued: u64,
    completed: u64,
}

impl CrudState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The persistent query
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Latest search result
    pub fn page(&self) -> &PageResult {
        &self.page
    }

    /// Record shown by the edit and read dialogs
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    pub fn dialogs(&self) -> DialogState {
        self.dialogs
    }

    /// Check if the latest issued search is still running
    pub fn is_loading(&self) -> bool {
        self.completed < self.issued
    }

    /// Open a dialog; edit and read also select `record`
    pub fn open(&mut self, dialog: Dialog, record: Option<&Record>) {
        if matches!(dialog, Dialog::Edit | Dialog::Read) {
            if let Some(record) = record {
                self.current = Some(record.clone());
            }
        }
        self.dialogs.set(dialog, true);
    }

    pub fn close(&mut self, dialog: Dialog) {
        self.dialogs.set(dialog, false);
    }

    pub fn merge_page(&mut self, page: PageSpec) {
        self.query = self.query.with_page(page);
    }

    pub fn merge_sort(&mut self, sort: SortSpec) {
        self.query = self.query.with_sort(sort);
    }

    pub fn merge_filter(&mut self, filter: Vec<Predicate>) {
        self.query = self.query.with_filter(filter);
    }

    /// Issue a search for the current query
    pub fn begin_search(&mut self) -> SearchTicket {
        self.issued += 1;
        SearchTicket {
            seq: self.issued,
            query: self.query.clone(),
        }
    }

    /// Record the completion of `ticket`
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: CrudResult<PageResult>,
    ) -> SearchOutcome {
        if ticket.seq < self.issued {
            warn!(
                seq = ticket.seq,
                latest = self.issued,
                "Discarding stale search result"
            );
            return SearchOutcome::Stale;
        }
        self.completed = ticket.seq;
        match result {
            Ok(page) => {
                self.page = page;
                SearchOutcome::Applied
            }
            Err(err) => SearchOutcome::Failed(err),
        }
    }
}

/// Shared access to a `CrudState`
pub trait StateHandle {
    /// Run `f` with exclusive access to the state
    fn update<R>(&self, f: impl FnOnce(&mut CrudState) -> R) -> R;

    /// Copy of the current state
    fn snapshot(&self) -> CrudState {
        self.update(|state| state.clone())
    }
}

impl StateHandle for Arc<Mutex<CrudState>> {
    fn update<R>(&self, f: impl FnOnce(&mut CrudState) -> R) -> R {
        let mut guard = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Drives one CRUD screen
pub struct CrudOrchestrator<P: ?Sized, S, K> {
    processors: Arc<P>,
    state: S,
    sink: K,
}

impl<P: ?Sized, S: Clone, K: Clone> Clone for CrudOrchestrator<P, S, K> {
    fn clone(&self) -> Self {
        Self {
            processors: Arc::clone(&self.processors),
            state: self.state.clone(),
            sink: self.sink.clone(),
        }
    }
}

impl<P, S, K> CrudOrchestrator<P, S, K>
where
    P: CrudProcessors + ?Sized,
    S: StateHandle,
    K: ErrorSink,
{
    pub fn new(processors: Arc<P>, state: S, sink: K) -> Self {
        Self {
            processors,
            state,
            sink,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn processors(&self) -> &Arc<P> {
        &self.processors
    }

    /// Initial search with the empty query
    pub async fn mount(&self) {
        debug!("Mounting CRUD screen");
        self.search().await;
    }

    /// Search with the persistent query
    pub async fn search(&self) {
        let ticket = self.state.update(|state| state.begin_search());
        info!(seq = ticket.seq, "Searching");
        let result = self.processors.process_search(&ticket.query).await;
        let outcome = self
            .state
            .update(|state| state.complete_search(&ticket, result));
        if let SearchOutcome::Failed(err) = outcome {
            self.sink.report("search", &err);
        }
    }

    /// Alias of `search` for the toolbar refresh button
    pub async fn refresh(&self) {
        self.search().await;
    }

    pub fn open_create(&self) {
        self.state.update(|state| state.open(Dialog::Create, None));
    }

    pub fn open_edit(&self, record: &Record) {
        self.state.update(|state| state.open(Dialog::Edit, Some(record)));
    }

    pub fn open_read(&self, record: &Record) {
        self.state.update(|state| state.open(Dialog::Read, Some(record)));
    }

    pub fn open_filter(&self) {
        self.state.update(|state| state.open(Dialog::Filter, None));
    }

    pub fn close(&self, dialog: Dialog) {
        self.state.update(|state| state.close(dialog));
    }

    /// Create, close the create dialog, then search
    pub async fn submit_create(&self, record: &Record) {
        match self.processors.process_create(record).await {
            Ok(id) => info!(id = %id, "Record created"),
            Err(err) => self.sink.report("create", &err),
        }
        self.close(Dialog::Create);
        self.search().await;
    }

    /// Update, close the edit dialog, then search
    pub async fn submit_update(&self, record: &Record) {
        match self.processors.process_update(record).await {
            Ok(ack) if ack.is_ok() => info!("Record updated"),
            Ok(ack) => warn!(ack = %ack.0, "Update not acknowledged"),
            Err(err) => self.sink.report("update", &err),
        }
        self.close(Dialog::Edit);
        self.search().await;
    }

    /// Delete a record whose deletion was already confirmed, then search
    pub async fn delete(&self, record: &Record) {
        match self.processors.process_delete(record).await {
            Ok(ack) if ack.is_ok() => info!("Record deleted"),
            Ok(ack) => warn!(ack = %ack.0, "Delete not acknowledged"),
            Err(err) => self.sink.report("delete", &err),
        }
        self.search().await;
    }

    pub async fn change_page(&self, page: PageSpec) {
        self.state.update(|state| state.merge_page(page));
        self.search().await;
    }

    pub async fn change_sort(&self, sort: SortSpec) {
        self.state.update(|state| state.merge_sort(sort));
        self.search().await;
    }

    /// Apply a filter, close the filter dialog, then search
    pub async fn submit_filter(&self, filter: Vec<Predicate>) {
        self.state.update(|state| {
            state.merge_filter(filter);
            state.close(Dialog::Filter);
        });
        self.search().await;
    }

    pub async fn row_click(&self, record: &Record) {
        if let Err(err) = self.processors.process_row_click(record).await {
            self.sink.report("row_click", &err);
        }
    }

    /// Dispatch a table event
    pub async fn handle(&self, event: TableEvent) {
        match event {
            TableEvent::Detail(record) => self.open_read(&record),
            TableEvent::Edit(record) => self.open_edit(&record),
            TableEvent::Delete(record) => self.delete(&record).await,
            TableEvent::RowClick(record) => self.row_click(&record).await,
            TableEvent::PageChange(page) => self.change_page(page).await,
            TableEvent::SortChange(sort) => self.change_sort(sort).await,
        }
    }
}
