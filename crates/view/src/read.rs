//! Read-only detail view

use crate::resolve::{DisplayDirective, render_read};
use serde_json::Value;
use smallcrud_core::TypeDescriptor;
use smallcrud_schema::{Record, Schema};

/// One label/value row of the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRow {
    pub label: String,
    pub ty: TypeDescriptor,
    pub value: Value,
    pub directive: DisplayDirective,
}

/// Rows for `record` in schema field order; empty when nothing is selected
pub fn read_rows(schema: &Schema, record: Option<&Record>) -> Vec<ReadRow> {
    let Some(record) = record else {
        return Vec::new();
    };
    schema
        .fields
        .iter()
        .map(|field| {
            let value = record.get(&field.name).cloned().unwrap_or(Value::Null);
            ReadRow {
                label: field.display_label().to_string(),
                ty: field.ty.clone(),
                directive: render_read(&field.ty, Some(&value)),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use smallcrud_schema::FieldDescriptor;

    #[test]
    fn test_rows_follow_field_order() {
        let schema = Schema::new("friend")
            .with_field(FieldDescriptor::new("name", TypeDescriptor::String).with_label("Name"))
            .with_field(FieldDescriptor::new("vip", TypeDescriptor::Boolean));
        let record = Record::new()
            .with("vip", json!(true))
            .with("name", json!("Ann"));

        let rows = read_rows(&schema, Some(&record));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Name");
        assert_eq!(rows[0].directive, DisplayDirective::Text("Ann".into()));
        assert_eq!(rows[1].label, "vip");
        assert_eq!(rows[1].directive, DisplayDirective::Toggle { on: true });
    }

    #[test]
    fn test_no_record_no_rows() {
        let schema = Schema::new("friend");
        assert!(read_rows(&schema, None).is_empty());
    }
}
