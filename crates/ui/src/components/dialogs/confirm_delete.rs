//! # Confirm Delete Dialog Component
//!
//! Asks before a record is deleted. Declining emits nothing.

use dioxus::prelude::*;
use smallcrud_schema::Record;
use smallcrud_view::table::DELETE_PROMPT;

use crate::components::dialogs::Modal;

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDeleteDialogProps {
    /// Record awaiting deletion
    pub record: Record,

    pub on_confirm: EventHandler<()>,

    pub on_cancel: EventHandler<()>,
}

/// Confirmation dialog for a row delete
#[component]
pub fn ConfirmDeleteDialog(props: ConfirmDeleteDialogProps) -> Element {
    let on_confirm = props.on_confirm;
    let on_cancel = props.on_cancel;
    let id = props
        .record
        .id()
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .unwrap_or_default();

    rsx! {
        Modal {
            title: "Delete",
            class: "modal-small".to_string(),
            on_close: move |_| on_cancel.call(()),
            p { class: "confirm-message", "{DELETE_PROMPT}" }
            if !id.is_empty() {
                p { class: "text-muted", "ID: {id}" }
            }
            div {
                class: "modal-actions",
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    r#type: "button",
                    class: "btn btn-danger",
                    onclick: move |_| on_confirm.call(()),
                    "Delete"
                }
            }
        }
    }
}
