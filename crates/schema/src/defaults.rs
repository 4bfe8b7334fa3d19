//! Default values per field type
//!
//! The create form is seeded exclusively from these defaults, so the
//! produced record always has exactly one key per input field.

use crate::record::Record;
use crate::schema::FieldDescriptor;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use smallcrud_core::TypeDescriptor;

/// Default value of one type at the given instant
pub fn default_value(ty: &TypeDescriptor, now: DateTime<Utc>) -> Value {
    match ty {
        TypeDescriptor::Boolean => Value::Bool(false),
        TypeDescriptor::DateTime => Value::String(format_timestamp(now)),
        TypeDescriptor::Enum { values } => values
            .first()
            .map(|v| Value::String(v.clone()))
            .unwrap_or(Value::Null),
        TypeDescriptor::Int | TypeDescriptor::Float => json!(0),
        _ => Value::String(String::new()),
    }
}

/// Defaults for every field, captured at `now`
pub fn defaults_at(fields: &[FieldDescriptor], now: DateTime<Utc>) -> Record {
    fields
        .iter()
        .map(|f| (f.name.clone(), default_value(&f.ty, now)))
        .collect()
}

/// Defaults for every field, using the current time for timestamps
pub fn defaults_for(fields: &[FieldDescriptor]) -> Record {
    defaults_at(fields, Utc::now())
}

/// Timestamp in the JSON form used on the wire (RFC 3339, UTC, millis)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    fn field(name: &str, ty: TypeDescriptor) -> FieldDescriptor {
        FieldDescriptor::new(name, ty)
    }

    #[test]
    fn test_defaults_per_tag() {
        let fields = vec![
            field("string", TypeDescriptor::String),
            field("html", TypeDescriptor::Html),
            field("code", TypeDescriptor::Code { data: json!({}) }),
            field("image", TypeDescriptor::Image { data: Value::Null }),
            field("int", TypeDescriptor::Int),
            field("float", TypeDescriptor::Float),
            field("boolean", TypeDescriptor::Boolean),
            field("datetime", TypeDescriptor::DateTime),
            field(
                "enum",
                TypeDescriptor::Enum {
                    values: vec!["yes".into(), "no".into()],
                },
            ),
            field("id", TypeDescriptor::Id),
            field("db", TypeDescriptor::Database),
            field("geo", TypeDescriptor::Other("Geo".into())),
        ];

        let record = defaults_at(&fields, fixed_now());
        assert_eq!(
            record.into_value(),
            json!({
                "string": "",
                "html": "",
                "code": "",
                "image": "",
                "int": 0,
                "float": 0,
                "boolean": false,
                "datetime": "2024-03-01T12:30:00.000Z",
                "enum": "yes",
                "id": "",
                "db": "",
                "geo": ""
            })
        );
    }

    #[test]
    fn test_key_set_matches_fields() {
        let fields = vec![
            field("zeta", TypeDescriptor::String),
            field("alpha", TypeDescriptor::Int),
            field("mid", TypeDescriptor::Boolean),
        ];
        let record = defaults_for(&fields);
        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_empty_enum_defaults_to_null() {
        let value = default_value(&TypeDescriptor::Enum { values: vec![] }, fixed_now());
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_empty_field_list() {
        assert!(defaults_for(&[]).is_empty());
    }
}
