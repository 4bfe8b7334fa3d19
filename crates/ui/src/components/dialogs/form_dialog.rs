//! # Create and Edit Dialogs
//!
//! Each dialog owns its form in a signal. The dialogs are mounted only while
//! open, so a reopened create dialog starts from fresh defaults. The edit
//! dialog is keyed by record id upstream and re-seeds when the record changes.

use dioxus::prelude::*;
use serde_json::Value;
use smallcrud_schema::Record;
use smallcrud_view::{CreateForm, Dialog, EditForm, InputBinding, InputContext};

use crate::components::dialogs::Modal;
use crate::components::inputs::FieldInput;
use crate::state::{ScreenSetup, UiOrchestrator};

/// Dialog for a new record
#[component]
pub fn CreateDialog() -> Element {
    let setup = use_context::<ScreenSetup>();
    let orch = use_context::<UiOrchestrator>();
    let mut form = use_signal(|| CreateForm::new(setup.schema.clone()));

    let ctx = InputContext {
        upload: setup.config.upload.clone(),
    };
    let bindings = form.read().bindings(&ctx);

    let close = {
        let orch = orch.clone();
        use_callback(move |_: ()| orch.close(Dialog::Create))
    };
    let submit = move |_| {
        let record = form.read().submit();
        let orch = orch.clone();
        spawn(async move { orch.submit_create(&record).await });
    };

    rsx! {
        Modal {
            title: "Create",
            on_close: close,
            FormFields {
                bindings,
                on_field: move |(name, value): (String, Value)| {
                    if let Err(err) = form.write().set(&name, value) {
                        tracing::warn!(field = %name, error = %err, "Field update rejected");
                    }
                },
            }
            div {
                class: "modal-actions",
                button { r#type: "button", class: "btn", onclick: move |_| form.write().reset(), "Reset" }
                button { r#type: "button", class: "btn", onclick: move |_| close.call(()), "Cancel" }
                button { r#type: "button", class: "btn btn-primary", onclick: submit, "Submit" }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct EditDialogProps {
    /// Record being edited
    pub record: Record,
}

/// Dialog for an existing record
#[component]
pub fn EditDialog(props: EditDialogProps) -> Element {
    let setup = use_context::<ScreenSetup>();
    let orch = use_context::<UiOrchestrator>();
    let record = props.record.clone();
    let mut form = use_signal(|| EditForm::for_record(setup.schema.clone(), &record));

    let ctx = InputContext {
        upload: setup.config.upload.clone(),
    };
    let bindings = form.read().bindings(&ctx);

    let close = {
        let orch = orch.clone();
        use_callback(move |_: ()| orch.close(Dialog::Edit))
    };
    let submit = move |_| {
        let record = form.read().submit();
        let orch = orch.clone();
        spawn(async move { orch.submit_update(&record).await });
    };

    rsx! {
        Modal {
            title: "Edit",
            on_close: close,
            FormFields {
                bindings,
                on_field: move |(name, value): (String, Value)| {
                    if let Err(err) = form.write().set(&name, value) {
                        tracing::warn!(field = %name, error = %err, "Field update rejected");
                    }
                },
            }
            div {
                class: "modal-actions",
                button { r#type: "button", class: "btn", onclick: move |_| close.call(()), "Cancel" }
                button { r#type: "button", class: "btn btn-primary", onclick: submit, "Submit" }
            }
        }
    }
}

// ============================================================================
// Shared field list
// ============================================================================

#[component]
fn FormFields(bindings: Vec<InputBinding>, on_field: EventHandler<(String, Value)>) -> Element {
    rsx! {
        div {
            class: "form-fields",
            {bindings.into_iter().map(|binding| {
                let name = binding.name.clone();
                rsx! {
                    FieldInput {
                        key: "{name}",
                        binding,
                        on_change: move |value: Value| on_field.call((name.clone(), value)),
                    }
                }
            })}
        }
    }
}
