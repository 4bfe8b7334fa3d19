//! # Dialog Components
//!
//! The four CRUD dialogs plus the delete confirmation, all drawn inside the
//! shared `Modal` shell.

pub mod confirm_delete;
pub mod filter_dialog;
pub mod form_dialog;
pub mod read_dialog;

pub use confirm_delete::ConfirmDeleteDialog;
pub use filter_dialog::FilterDialog;
pub use form_dialog::{CreateDialog, EditDialog};
pub use read_dialog::ReadDialog;

use dioxus::prelude::*;

/// Properties for Modal component
#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    /// Header text
    pub title: String,

    /// Called when the close button or the backdrop is clicked
    pub on_close: EventHandler<()>,

    /// Extra class for the panel
    #[props(default)]
    pub class: Option<String>,

    pub children: Element,
}

/// Overlay with a titled panel
#[component]
pub fn Modal(props: ModalProps) -> Element {
    let on_close = props.on_close;
    let panel_class = format!("modal-panel {}", props.class.as_deref().unwrap_or(""));

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "{panel_class}",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    h2 { class: "modal-title", "{props.title}" }
                    button {
                        r#type: "button",
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body", {props.children} }
            }
        }
    }
}
