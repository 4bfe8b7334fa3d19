//! Screen State for the desktop front end
//!
//! Glue between the headless orchestrator and Dioxus signals: the CRUD
//! state lives in a `Signal<CrudState>` and orchestrator failures land in a
//! status-bar signal.

use dioxus::prelude::*;
use smallcrud_core::{CrudConfig, CrudError};
use smallcrud_schema::Schema;
use smallcrud_view::{CrudOrchestrator, CrudProcessors, CrudState, ErrorSink, StateHandle};
use std::sync::Arc;

// ============================================================================
// Launch Context
// ============================================================================

/// Everything one screen needs, handed to the app at launch
#[derive(Clone)]
pub struct ScreenSetup {
    /// Schema shown by the screen
    pub schema: Arc<Schema>,
    /// Loaded configuration
    pub config: CrudConfig,
    /// Processors driven by the orchestrator
    pub processors: Arc<dyn CrudProcessors>,
}

impl ScreenSetup {
    pub fn new(schema: Arc<Schema>, config: CrudConfig, processors: Arc<dyn CrudProcessors>) -> Self {
        Self {
            schema,
            config,
            processors,
        }
    }

    /// Window title: configured title, else the capitalized schema name
    pub fn title(&self) -> String {
        self.config
            .screen
            .title
            .clone()
            .unwrap_or_else(|| format!("{} - smallcrud", self.schema.type_name()))
    }

    /// Rows per page
    pub fn page_size(&self) -> u64 {
        u64::from(self.config.screen.page_size.max(1))
    }
}

// ============================================================================
// Status Messages
// ============================================================================

/// Status message shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl StatusLevel {
    /// CSS modifier for the status bar
    pub fn class(&self) -> &'static str {
        match self {
            StatusLevel::Info => "status-info",
            StatusLevel::Success => "status-success",
            StatusLevel::Error => "status-error",
        }
    }
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }

    /// Message for a failed orchestrator operation
    pub fn failure(operation: &str, err: &CrudError) -> Self {
        let what = match operation {
            "search" => "Search",
            "create" => "Create",
            "update" => "Update",
            "delete" => "Delete",
            "row_click" => "Row action",
            "upload" => "Upload",
            other => other,
        };
        Self::error(format!("{} failed: {}", what, err))
    }
}

// ============================================================================
// Signal Adapters
// ============================================================================

/// `StateHandle` over a Dioxus signal
#[derive(Clone, Copy, PartialEq)]
pub struct SignalState(pub Signal<CrudState>);

impl StateHandle for SignalState {
    fn update<R>(&self, f: impl FnOnce(&mut CrudState) -> R) -> R {
        let mut signal = self.0;
        let mut state = signal.write();
        f(&mut *state)
    }

    fn snapshot(&self) -> CrudState {
        self.0.read().clone()
    }
}

/// Error sink writing to the status bar
#[derive(Clone, Copy, PartialEq)]
pub struct StatusSink(pub Signal<Option<StatusMessage>>);

impl StatusSink {
    /// Show an arbitrary message
    pub fn show(&self, message: StatusMessage) {
        let mut signal = self.0;
        signal.set(Some(message));
    }
}

impl ErrorSink for StatusSink {
    fn report(&self, operation: &str, err: &CrudError) {
        tracing::error!(operation, error = %err, "Operation failed");
        self.show(StatusMessage::failure(operation, err));
    }
}

/// The orchestrator as used by the desktop app
pub type UiOrchestrator = CrudOrchestrator<dyn CrudProcessors, SignalState, StatusSink>;
