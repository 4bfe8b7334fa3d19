//! Field renderer resolvers
//!
//! Three total mappings from a field type to a headless widget directive:
//!
//! - `render_display`: table cells
//! - `render_read`: the label/value detail layout
//! - `render_input`: editable controls bound to `form[field.name]`
//!
//! Unknown tags never fail; they fall back to plain text.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use smallcrud_core::TypeDescriptor;
use smallcrud_core::config::UploadConfig;
use smallcrud_gateway::{UploadSlot, resolve_action};
use smallcrud_schema::{DefinitionTree, FieldDescriptor, Record, format_timestamp};

/// Text shown for timestamps that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Maximum width/height of image previews, in pixels
pub const IMAGE_PREVIEW_PX: u32 = 100;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PICKER_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ============================================================================
// Display
// ============================================================================

/// How to present one stored value
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayDirective {
    /// Localized timestamp
    Timestamp(String),
    /// Raw markup
    Markup(String),
    /// Read-only code viewer
    CodeViewer { source: String, config: Value },
    /// Size-bounded image
    Image { src: String, max_px: u32 },
    /// Disabled toggle
    Toggle { on: bool },
    /// Tag chip
    Tag(String),
    /// Pretty-printed structured value
    Structured(String),
    /// Plain text
    Text(String),
}

/// Resolve a table cell
pub fn render_display(ty: &TypeDescriptor, value: Option<&Value>) -> DisplayDirective {
    match ty {
        TypeDescriptor::DateTime => DisplayDirective::Timestamp(localize_timestamp(value)),
        TypeDescriptor::Html => DisplayDirective::Markup(text_of(value)),
        TypeDescriptor::Code { data } => DisplayDirective::CodeViewer {
            source: text_of(value),
            config: data.clone(),
        },
        TypeDescriptor::Image { .. } => DisplayDirective::Image {
            src: text_of(value),
            max_px: IMAGE_PREVIEW_PX,
        },
        TypeDescriptor::Boolean => DisplayDirective::Toggle {
            on: value.and_then(Value::as_bool).unwrap_or(false),
        },
        TypeDescriptor::Enum { .. } => DisplayDirective::Tag(text_of(value)),
        TypeDescriptor::Database => DisplayDirective::Structured(pretty(value)),
        _ => match value {
            Some(v @ (Value::Object(_) | Value::Array(_))) => {
                DisplayDirective::Structured(pretty(Some(v)))
            }
            other => DisplayDirective::Text(text_of(other)),
        },
    }
}

/// Resolve a detail-view value; same mapping as table cells
pub fn render_read(ty: &TypeDescriptor, value: Option<&Value>) -> DisplayDirective {
    render_display(ty, value)
}

/// Stored value as plain text; strings are unquoted, missing is empty
pub fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn pretty(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()),
    }
}

/// Parse a stored timestamp: RFC 3339 text or epoch milliseconds
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Timestamp in local time, or `Invalid Date`
pub fn localize_timestamp(value: Option<&Value>) -> String {
    parse_timestamp(value)
        .map(|dt| dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

// ============================================================================
// Input
// ============================================================================

/// Inputs needed by controls beyond the form itself
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub upload: UploadConfig,
}

/// Editable control for one field
#[derive(Debug, Clone, PartialEq)]
pub enum InputControl {
    /// Date/time picker; `value` is local `YYYY-MM-DDTHH:MM`
    DateTimePicker { value: String },
    /// Rich-text editor over markup
    RichText { markup: String },
    /// Code editor configured with the type's data bag
    CodeEditor { source: String, config: Value },
    /// Single-file image upload bound to a URL string
    ImageUpload { slot: UploadSlot, action: String },
    /// Numeric stepper; `integer` restricts stepping to whole numbers
    NumberStepper { value: f64, integer: bool },
    /// Toggle
    Toggle { on: bool },
    /// Select constrained to the enum values
    Select { value: String, options: Vec<String> },
    /// Nested schema-of-schemas editor
    SchemaEditor { tree: DefinitionTree },
    /// Single-line text
    Text { value: String, readonly: bool },
}

/// A control bound to one form key
#[derive(Debug, Clone, PartialEq)]
pub struct InputBinding {
    /// Form key
    pub name: String,
    /// Label shown next to the control
    pub label: String,
    /// Value type of the field
    pub ty: TypeDescriptor,
    /// The control
    pub control: InputControl,
}

/// Resolve the control for `field`, seeded from `form[field.name]`
pub fn render_input(form: &Record, field: &FieldDescriptor, ctx: &InputContext) -> InputBinding {
    let value = form.get(&field.name);
    let control = match &field.ty {
        TypeDescriptor::DateTime => InputControl::DateTimePicker {
            value: to_picker_value(value),
        },
        TypeDescriptor::Html => InputControl::RichText {
            markup: text_of(value),
        },
        TypeDescriptor::Code { data } => InputControl::CodeEditor {
            source: text_of(value),
            config: data.clone(),
        },
        TypeDescriptor::Image { .. } => InputControl::ImageUpload {
            slot: UploadSlot::from_value(value),
            action: resolve_action(&field.ty, &ctx.upload),
        },
        TypeDescriptor::Int | TypeDescriptor::Float => InputControl::NumberStepper {
            value: value.and_then(Value::as_f64).unwrap_or(0.0),
            integer: matches!(field.ty, TypeDescriptor::Int),
        },
        TypeDescriptor::Boolean => InputControl::Toggle {
            on: value.and_then(Value::as_bool).unwrap_or(false),
        },
        TypeDescriptor::Enum { values } => InputControl::Select {
            value: text_of(value),
            options: values.clone(),
        },
        TypeDescriptor::Database => InputControl::SchemaEditor {
            tree: value
                .and_then(|v| DefinitionTree::from_value(v).ok())
                .unwrap_or_default(),
        },
        _ => InputControl::Text {
            value: text_of(value),
            readonly: field.is_id(),
        },
    };

    InputBinding {
        name: field.name.clone(),
        label: field.display_label().to_string(),
        ty: field.ty.clone(),
        control,
    }
}

/// Convert raw control text into the stored value for a type
///
/// Returns `None` when the text does not parse (e.g. `"abc"` for Int);
/// callers keep the previous value in that case.
pub fn value_from_input(ty: &TypeDescriptor, raw: &str) -> Option<Value> {
    match ty {
        TypeDescriptor::Int => {
            let trimmed = raw.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.round() as i64))
                .map(Value::from)
        }
        TypeDescriptor::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        TypeDescriptor::Boolean => raw.trim().parse::<bool>().ok().map(Value::Bool),
        TypeDescriptor::DateTime => from_picker_value(raw).map(Value::String),
        _ => Some(Value::String(raw.to_string())),
    }
}

/// Stored timestamp as local picker text; empty when unparseable
pub fn to_picker_value(value: Option<&Value>) -> String {
    parse_timestamp(value)
        .map(|dt| dt.with_timezone(&Local).format(PICKER_FORMAT).to_string())
        .unwrap_or_default()
}

/// Local picker text (or full RFC 3339) as a stored timestamp
pub fn from_picker_value(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(format_timestamp(dt.with_timezone(&Utc)));
    }
    let naive = NaiveDateTime::parse_from_str(raw, PICKER_FORMAT).ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(format_timestamp(local.with_timezone(&Utc)))
}
