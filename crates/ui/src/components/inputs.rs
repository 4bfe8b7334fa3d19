//! # Input Components
//!
//! Draws the `InputControl` chosen by the input resolver for one form key.
//!
//! Every control reports the new stored value through `on_change`. Text that
//! does not parse for the field type is dropped so the form keeps its
//! previous value.

use dioxus::prelude::*;
use serde_json::Value;
use smallcrud_core::{CrudError, TypeDescriptor};
use smallcrud_gateway::UploadSlot;
use smallcrud_view::{ErrorSink, InputBinding, InputControl, value_from_input};

use crate::components::display::code_language;
use crate::components::schema_editor::SchemaEditor;
use crate::file_ops;
use crate::state::{ScreenSetup, StatusSink};

// ============================================================================
// Field Input
// ============================================================================

/// Properties for FieldInput component
#[derive(Props, Clone, PartialEq)]
pub struct FieldInputProps {
    /// Resolved control and its form key
    pub binding: InputBinding,

    /// Called with the new stored value
    pub on_change: EventHandler<Value>,
}

/// Labelled control for one form key
#[component]
pub fn FieldInput(props: FieldInputProps) -> Element {
    let binding = props.binding;
    let on_change = props.on_change;
    let ty = binding.ty.clone();

    let control = match binding.control {
        InputControl::DateTimePicker { value } => rsx! {
            input {
                class: "input",
                r#type: "datetime-local",
                value: "{value}",
                onchange: move |e| {
                    if let Some(v) = value_from_input(&TypeDescriptor::DateTime, &e.value()) {
                        on_change.call(v);
                    }
                },
            }
        },
        InputControl::RichText { markup } => rsx! {
            RichTextInput { markup, on_change }
        },
        InputControl::CodeEditor { source, config } => {
            let language = code_language(&config);
            rsx! {
                textarea {
                    class: "input code-editor",
                    "data-language": "{language}",
                    rows: 8,
                    spellcheck: false,
                    value: "{source}",
                    oninput: move |e| on_change.call(Value::String(e.value())),
                }
            }
        }
        InputControl::ImageUpload { slot, action } => rsx! {
            ImageUploadInput { ty: ty.clone(), slot, action, on_change }
        },
        InputControl::NumberStepper { value, integer } => rsx! {
            input {
                class: "input",
                r#type: "number",
                step: if integer { "1" } else { "any" },
                value: "{value}",
                oninput: move |e| {
                    if let Some(v) = value_from_input(&ty, &e.value()) {
                        on_change.call(v);
                    }
                },
            }
        },
        InputControl::Toggle { on } => rsx! {
            label {
                class: "toggle",
                input {
                    r#type: "checkbox",
                    checked: on,
                    onchange: move |e| on_change.call(Value::Bool(e.checked())),
                }
                span { class: "toggle-track" }
            }
        },
        InputControl::Select { value, options } => rsx! {
            select {
                class: "input",
                value: "{value}",
                onchange: move |e| on_change.call(Value::String(e.value())),
                for option in options.iter() {
                    option {
                        key: "{option}",
                        value: "{option}",
                        selected: *option == value,
                        "{option}"
                    }
                }
            }
        },
        InputControl::SchemaEditor { tree } => rsx! {
            SchemaEditor { tree, on_change }
        },
        InputControl::Text { value, readonly } => rsx! {
            input {
                class: "input",
                r#type: "text",
                value: "{value}",
                readonly,
                oninput: move |e| on_change.call(Value::String(e.value())),
            }
        },
    };

    rsx! {
        div {
            class: "form-row",
            label { class: "form-label", "{binding.label}" }
            div { class: "form-control", {control} }
        }
    }
}

// ============================================================================
// Rich Text
// ============================================================================

/// Markup source with a live preview
#[component]
fn RichTextInput(markup: String, on_change: EventHandler<Value>) -> Element {
    rsx! {
        div {
            class: "rich-text",
            textarea {
                class: "input",
                rows: 6,
                value: "{markup}",
                oninput: move |e| on_change.call(Value::String(e.value())),
            }
            div { class: "rich-text-preview", dangerous_inner_html: "{markup}" }
        }
    }
}

// ============================================================================
// Image Upload
// ============================================================================

/// Single-file image upload bound to a URL string
#[component]
fn ImageUploadInput(
    ty: TypeDescriptor,
    slot: UploadSlot,
    action: String,
    on_change: EventHandler<Value>,
) -> Element {
    let setup = use_context::<ScreenSetup>();
    let status = use_context::<StatusSink>();
    let mut uploading = use_signal(|| false);

    let pick = {
        let slot = slot.clone();
        move |_| {
            let slot = slot.clone();
            let ty = ty.clone();
            let config = setup.config.clone();
            uploading.set(true);
            spawn(async move {
                match file_ops::pick_and_upload(&ty, &config, &slot).await {
                    Ok(next) => on_change.call(next.to_value()),
                    Err(CrudError::Cancelled) => tracing::debug!("Image selection cancelled"),
                    Err(err) => status.report("upload", &err),
                }
                uploading.set(false);
            });
        }
    };

    let clear = {
        let slot = slot.clone();
        move |_| {
            let mut cleared = slot.clone();
            cleared.clear();
            on_change.call(cleared.to_value());
        }
    };

    let busy = *uploading.read();

    rsx! {
        div {
            class: "image-upload",
            "data-action": "{action}",
            if let Some(url) = slot.url() {
                div {
                    class: "image-upload-item",
                    img { class: "image-upload-preview", src: "{url}" }
                    button { r#type: "button", class: "btn btn-small", onclick: clear, "Remove" }
                }
            }
            button {
                r#type: "button",
                class: "btn",
                disabled: busy || !slot.can_accept(),
                onclick: pick,
                if busy { "Uploading..." } else { "Upload" }
            }
        }
    }
}
