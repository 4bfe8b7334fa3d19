//! Main Application Component for smallcrud
//!
//! Root component of one CRUD screen: toolbar, search table, the four
//! dialogs and the status bar. The orchestrator is built once here and
//! shared with every child through context.

use dioxus::prelude::*;
use smallcrud_schema::Record;
use smallcrud_view::{CrudState, StateHandle};

use crate::components::{CreateDialog, CrudTable, EditDialog, FilterDialog, ReadDialog};
use crate::state::{ScreenSetup, SignalState, StatusLevel, StatusMessage, StatusSink, UiOrchestrator};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let setup = use_context::<ScreenSetup>();
    let crud_state = use_signal(CrudState::new);
    let status = use_signal(|| None::<StatusMessage>);

    let state = use_context_provider(|| SignalState(crud_state));
    use_context_provider(|| StatusSink(status));
    let orch = use_context_provider(|| {
        UiOrchestrator::new(setup.processors.clone(), state, StatusSink(status))
    });

    use_hook(|| {
        let orch = orch.clone();
        spawn(async move { orch.mount().await });
    });

    let snapshot = state.snapshot();
    let dialogs = snapshot.dialogs();
    let current = snapshot.current().cloned();

    rsx! {
        div {
            class: "app-container",

            Toolbar { title: setup.title(), loading: snapshot.is_loading(), count: snapshot.page().count }

            main {
                class: "content",
                CrudTable {}
            }

            StatusBar {}

            if dialogs.create {
                CreateDialog {}
            }
            if dialogs.edit {
                if let Some(record) = current.clone() {
                    EditDialog { key: "{record_key(&record)}", record }
                }
            }
            if dialogs.read {
                ReadDialog { record: current.clone() }
            }
            if dialogs.filter {
                FilterDialog {}
            }
        }
    }
}

/// Stable key for a record; the id when present
fn record_key(record: &Record) -> String {
    record
        .id()
        .map(|id| id.as_str().map(str::to_string).unwrap_or_else(|| id.to_string()))
        .unwrap_or_else(|| "new".to_string())
}

// ============================================================================
// Toolbar Component
// ============================================================================

#[component]
fn Toolbar(title: String, loading: bool, count: u64) -> Element {
    let orch = use_context::<UiOrchestrator>();

    let create = {
        let orch = orch.clone();
        move |_| orch.open_create()
    };
    let filter = {
        let orch = orch.clone();
        move |_| orch.open_filter()
    };
    let refresh = move |_| {
        let orch = orch.clone();
        spawn(async move { orch.refresh().await });
    };

    rsx! {
        header {
            class: "toolbar",
            span { class: "toolbar-title", "{title}" }
            span { class: "toolbar-count", "{count} records" }
            div { class: "toolbar-spacer" }
            ToolbarButton { label: "Create", onclick: create }
            ToolbarButton { label: "Filter", onclick: filter }
            ToolbarButton { label: "Refresh", disabled: loading, onclick: refresh }
        }
    }
}

#[component]
fn ToolbarButton(
    label: &'static str,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "btn",
            disabled,
            onclick: move |e| {
                if !disabled {
                    onclick.call(e);
                }
            },
            "{label}"
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

#[component]
fn StatusBar() -> Element {
    let mut status = use_context::<StatusSink>().0;
    let message = status.read().clone();

    rsx! {
        footer {
            class: "status-bar",
            if let Some(msg) = message {
                span { class: "{msg.level.class()}", "{msg.text}" }
                if msg.level == StatusLevel::Error {
                    button {
                        r#type: "button",
                        class: "status-dismiss",
                        onclick: move |_| status.set(None),
                        "×"
                    }
                }
            } else {
                span { class: "text-muted", "Ready" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_key() {
        assert_eq!(record_key(&Record::new().with("_id", json!("a1"))), "a1");
        assert_eq!(record_key(&Record::new().with("_id", json!(7))), "7");
        assert_eq!(record_key(&Record::new()), "new");
    }
}
