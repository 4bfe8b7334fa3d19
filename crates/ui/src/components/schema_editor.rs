//! # Schema Editor Component
//!
//! Editor for `Database` fields: a list of type definitions, each with its
//! own field list. Every edit goes through the index-based operations of
//! `DefinitionTree` and reports the serialized tree.

use dioxus::prelude::*;
use serde_json::Value;
use smallcrud_core::{CrudResult, TypeDescriptor};
use smallcrud_schema::DefinitionTree;

/// Properties for SchemaEditor component
#[derive(Props, Clone, PartialEq)]
pub struct SchemaEditorProps {
    /// Tree the editor starts from
    pub tree: DefinitionTree,

    /// Called with the serialized tree after each edit
    pub on_change: EventHandler<Value>,
}

/// Nested schema-of-schemas editor
#[component]
pub fn SchemaEditor(props: SchemaEditorProps) -> Element {
    let initial = props.tree.clone();
    let mut tree = use_signal(move || initial);
    let on_change = props.on_change;

    // Apply one edit and publish the result
    let mut edit = move |op: &dyn Fn(&mut DefinitionTree) -> CrudResult<()>| {
        let result = op(&mut *tree.write());
        match result {
            Ok(()) => on_change.call(tree.read().to_value()),
            Err(err) => tracing::warn!(error = %err, "Schema edit rejected"),
        }
    };

    let snapshot = tree.read().clone();

    rsx! {
        div {
            class: "schema-editor",
            for (ti, def) in snapshot.types().iter().enumerate() {
                div {
                    key: "{def.key}",
                    class: "schema-type",
                    div {
                        class: "schema-type-header",
                        input {
                            class: "input",
                            r#type: "text",
                            placeholder: "type name",
                            value: "{def.name}",
                            oninput: move |e| {
                                let name = e.value();
                                edit(&|t| t.rename_type(ti, name.clone()));
                            },
                        }
                        button {
                            r#type: "button",
                            class: "btn btn-small btn-danger",
                            onclick: move |_| edit(&|t| t.remove_type(ti).map(|_| ())),
                            "Remove type"
                        }
                    }
                    for (fi, field) in def.fields.iter().enumerate() {
                        div {
                            key: "{field.key}",
                            class: "schema-field",
                            input {
                                class: "input",
                                r#type: "text",
                                placeholder: "field name",
                                value: "{field.name}",
                                oninput: move |e| {
                                    let name = e.value();
                                    edit(&|t| t.set_field_name(ti, fi, name.clone()));
                                },
                            }
                            select {
                                class: "input",
                                value: "{field.ty.name()}",
                                onchange: move |e| {
                                    let ty = TypeDescriptor::from_tag(&e.value());
                                    edit(&|t| t.set_field_type(ti, fi, ty.clone()));
                                },
                                for tag in TypeDescriptor::all_tags().iter() {
                                    option {
                                        key: "{tag}",
                                        value: "{tag}",
                                        selected: field.ty.name() == *tag,
                                        "{tag}"
                                    }
                                }
                            }
                            button {
                                r#type: "button",
                                class: "btn btn-small",
                                onclick: move |_| edit(&|t| t.remove_field(ti, fi).map(|_| ())),
                                "Remove"
                            }
                        }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-small",
                        onclick: move |_| {
                            edit(&|t| t.add_field(ti, "", TypeDescriptor::String).map(|_| ()))
                        },
                        "Add field"
                    }
                }
            }
            button {
                r#type: "button",
                class: "btn",
                onclick: move |_| {
                    edit(&|t| {
                        t.add_type("");
                        Ok(())
                    })
                },
                "Add type"
            }
        }
    }
}
