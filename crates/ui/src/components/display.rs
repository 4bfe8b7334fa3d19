//! # Display Components
//!
//! Draws a `DisplayDirective` produced by the display or read resolver.

use dioxus::prelude::*;
use serde_json::Value;
use smallcrud_view::DisplayDirective;

#[derive(Props, Clone, PartialEq)]
pub struct DisplayCellProps {
    pub directive: DisplayDirective,
}

/// One displayed value
#[component]
pub fn DisplayCell(props: DisplayCellProps) -> Element {
    match props.directive {
        DisplayDirective::Timestamp(text) => rsx! {
            span { class: "cell-timestamp", "{text}" }
        },
        DisplayDirective::Markup(markup) => rsx! {
            div { class: "cell-markup", dangerous_inner_html: "{markup}" }
        },
        DisplayDirective::CodeViewer { source, config } => {
            let language = code_language(&config);
            rsx! {
                pre {
                    class: "code-viewer",
                    "data-language": "{language}",
                    code { "{source}" }
                }
            }
        }
        DisplayDirective::Image { src, max_px } => {
            if src.is_empty() {
                rsx! { span { class: "text-muted", "-" } }
            } else {
                rsx! {
                    img {
                        class: "cell-image",
                        src: "{src}",
                        style: "max-width: {max_px}px; max-height: {max_px}px;",
                    }
                }
            }
        }
        DisplayDirective::Toggle { on } => rsx! {
            label {
                class: "toggle toggle-disabled",
                input { r#type: "checkbox", checked: on, disabled: true }
                span { class: "toggle-track" }
            }
        },
        DisplayDirective::Tag(text) => rsx! {
            span { class: "tag", "{text}" }
        },
        DisplayDirective::Structured(text) => rsx! {
            pre { class: "cell-structured", "{text}" }
        },
        DisplayDirective::Text(text) => rsx! {
            span { "{text}" }
        },
    }
}

/// Language hint from a code type's data bag
pub fn code_language(config: &Value) -> String {
    config
        .get("language")
        .or_else(|| config.get("mode"))
        .and_then(Value::as_str)
        .unwrap_or("text")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_language() {
        assert_eq!(code_language(&json!({"language": "rust"})), "rust");
        assert_eq!(code_language(&json!({"mode": "javascript"})), "javascript");
        assert_eq!(code_language(&Value::Null), "text");
    }
}
