//! # Filter Dialog
//!
//! Predicate rows over the schema's fields. Starts from the filter of the
//! persistent query; submitting replaces it and closes the dialog.

use dioxus::prelude::*;
use smallcrud_core::Operator;
use smallcrud_view::{Dialog, FilterBuilder, StateHandle};

use crate::components::dialogs::Modal;
use crate::state::{ScreenSetup, SignalState, UiOrchestrator};

#[component]
pub fn FilterDialog() -> Element {
    let setup = use_context::<ScreenSetup>();
    let orch = use_context::<UiOrchestrator>();
    let state = use_context::<SignalState>();
    let mut builder = use_signal(|| {
        let filter = state.snapshot().query().filter.clone();
        FilterBuilder::from_filter(setup.schema.clone(), &filter)
    });

    let snapshot = builder.read().clone();
    let fields: Vec<String> = snapshot
        .field_options()
        .into_iter()
        .map(str::to_string)
        .collect();

    let close = {
        let orch = orch.clone();
        use_callback(move |_: ()| orch.close(Dialog::Filter))
    };
    let submit = move |_| {
        let filter = builder.read().submit();
        let orch = orch.clone();
        spawn(async move { orch.submit_filter(filter).await });
    };

    rsx! {
        Modal {
            title: "Filter",
            on_close: close,
            div {
                class: "filter-rows",
                for (index, row) in snapshot.rows().iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "filter-row",
                        select {
                            class: "input",
                            value: "{row.name}",
                            onchange: move |e| {
                                if let Err(err) = builder.write().set_field(index, &e.value()) {
                                    tracing::warn!(error = %err, "Filter field rejected");
                                }
                            },
                            option { value: "", selected: row.name.is_empty(), "-" }
                            for field in fields.iter() {
                                option {
                                    key: "{field}",
                                    value: "{field}",
                                    selected: *field == row.name,
                                    "{field}"
                                }
                            }
                        }
                        select {
                            class: "input input-narrow",
                            value: "{row.operator.symbol()}",
                            onchange: move |e| {
                                match e.value().parse::<Operator>() {
                                    Ok(op) => {
                                        if let Err(err) = builder.write().set_operator(index, op) {
                                            tracing::warn!(error = %err, "Filter operator rejected");
                                        }
                                    }
                                    Err(err) => tracing::warn!(error = %err, "Unknown filter operator"),
                                }
                            },
                            for op in Operator::all().iter() {
                                option {
                                    key: "{op.symbol()}",
                                    value: "{op.symbol()}",
                                    selected: *op == row.operator,
                                    "{op.symbol()}"
                                }
                            }
                        }
                        input {
                            class: "input",
                            r#type: "text",
                            value: "{display_value(&row.value)}",
                            oninput: move |e| {
                                if let Err(err) = builder.write().set_value_input(index, &e.value()) {
                                    tracing::warn!(error = %err, "Filter value rejected");
                                }
                            },
                        }
                        button {
                            r#type: "button",
                            class: "btn btn-small",
                            onclick: move |_| {
                                if let Err(err) = builder.write().remove_row(index) {
                                    tracing::warn!(error = %err, "Filter row not removed");
                                }
                            },
                            "Remove"
                        }
                    }
                }
            }
            div {
                class: "modal-actions",
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| {
                        builder.write().add_row();
                    },
                    "Add condition"
                }
                button { r#type: "button", class: "btn", onclick: move |_| close.call(()), "Cancel" }
                button { r#type: "button", class: "btn btn-primary", onclick: submit, "Search" }
            }
        }
    }
}

/// Text shown in a row's value box
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!("Ann")), "Ann");
        assert_eq!(display_value(&json!(21)), "21");
    }
}
