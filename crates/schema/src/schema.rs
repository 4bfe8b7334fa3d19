//! Schema and field descriptors
//!
//! A `Schema` names a record type and lists its fields in display order.
//! Schemas are immutable for the lifetime of a screen and are shared
//! read-only between the builders, the gateway and the orchestrator.

use crate::record::ID_FIELD;
use serde::{Deserialize, Serialize};
use smallcrud_core::{CrudError, CrudResult, Persistable, TypeDescriptor, Validatable};
use std::collections::HashSet;

// ============================================================================
// Field Descriptor
// ============================================================================

/// Sort capability of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sortable {
    /// Not sortable
    #[default]
    None,
    /// Sorted by the backend (the table emits sort-change events)
    Custom,
}

/// One field of a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within the schema
    pub name: String,

    /// Value type
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,

    /// Display label, falls back to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Sort capability
    #[serde(default, skip_serializing_if = "is_not_sortable")]
    pub sortable: Sortable,
}

fn is_not_sortable(sortable: &Sortable) -> bool {
    *sortable == Sortable::None
}

impl FieldDescriptor {
    /// Create a new field with the given name and type
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            label: None,
            sortable: Sortable::None,
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the field as sortable by the backend
    pub fn sortable(mut self) -> Self {
        self.sortable = Sortable::Custom;
        self
    }

    /// Label shown to the user
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Check if this is the reserved identifier field
    pub fn is_id(&self) -> bool {
        self.name == ID_FIELD
    }

    /// Check if the backend sorts on this field
    pub fn is_custom_sortable(&self) -> bool {
        self.sortable == Sortable::Custom
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Declarative description of one record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Record type name; prefixes every operation name
    pub name: String,

    /// Fields in display order
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Type name: the schema name with its first character upper-cased
    pub fn type_name(&self) -> String {
        capitalize_first(&self.name)
    }

    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find a field by name, failing with `UnknownField`
    pub fn require_field(&self, name: &str) -> CrudResult<&FieldDescriptor> {
        self.field(name).ok_or_else(|| CrudError::UnknownField {
            schema: self.name.clone(),
            field: name.to_string(),
        })
    }

    /// Field names in display order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Fields excluding `_id`, as used by create forms
    pub fn editable_fields(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_id()).cloned().collect()
    }

    /// Check if any field is sorted by the backend
    pub fn has_custom_sort(&self) -> bool {
        self.fields.iter().any(FieldDescriptor::is_custom_sortable)
    }
}

/// Upper-case the first character only (`friendList` -> `FriendList`)
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Validatable for Schema {
    fn validate(&self) -> CrudResult<()> {
        if self.name.trim().is_empty() {
            return Err(CrudError::invalid_schema("", "Schema name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(CrudError::invalid_schema(
                    &self.name,
                    "Field name cannot be empty",
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(CrudError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if let TypeDescriptor::Enum { values } = &field.ty {
                if values.is_empty() {
                    return Err(CrudError::invalid_schema(
                        &self.name,
                        format!("Enum field '{}' has no values", field.name),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Persistable for Schema {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn friend() -> Schema {
        Schema::new("friend")
            .with_field(FieldDescriptor::new("_id", TypeDescriptor::Id).sortable())
            .with_field(
                FieldDescriptor::new("name", TypeDescriptor::String)
                    .with_label("Name")
                    .sortable(),
            )
    }

    #[test]
    fn test_parse_schema_file_shape() {
        let schema: Schema = serde_json::from_value(json!({
            "name": "friend",
            "fields": [
                {"name": "_id", "type": {"name": "ID"}, "sortable": "custom"},
                {"name": "name", "type": {"name": "String"}, "label": "Name", "sortable": "custom"}
            ]
        }))
        .unwrap();
        assert_eq!(schema, friend());
    }

    #[test]
    fn test_serialize_omits_optional_keys() {
        let field = FieldDescriptor::new("age", TypeDescriptor::Int);
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({"name": "age", "type": {"name": "Int"}})
        );
    }

    #[test]
    fn test_lookup_helpers() {
        let schema = friend();
        assert_eq!(schema.field_names(), vec!["_id", "name"]);
        assert_eq!(schema.field("name").unwrap().display_label(), "Name");
        assert_eq!(schema.field("_id").unwrap().display_label(), "_id");
        assert!(schema.require_field("age").is_err());
        assert_eq!(schema.editable_fields().len(), 1);
        assert!(schema.has_custom_sort());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(friend().type_name(), "Friend");
        assert_eq!(capitalize_first("blogPost"), "BlogPost");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_validation() {
        assert!(friend().is_valid());

        let dup = friend().with_field(FieldDescriptor::new("name", TypeDescriptor::Int));
        assert!(matches!(
            dup.validate(),
            Err(CrudError::DuplicateField { .. })
        ));

        let empty_enum = Schema::new("x").with_field(FieldDescriptor::new(
            "state",
            TypeDescriptor::Enum { values: vec![] },
        ));
        assert!(!empty_enum.is_valid());

        assert!(!Schema::new(" ").is_valid());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("friend.json");
        friend().save_to_file(&path).unwrap();
        assert_eq!(Schema::load_from_file(&path).unwrap(), friend());
    }
}
