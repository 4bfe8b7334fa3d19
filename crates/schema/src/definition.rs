//! Nested schema definitions
//!
//! A `Database`-typed field holds a list of schema definitions, each a
//! `{name, fields}` pair. The editor manipulates that list as an explicit
//! tree with index-based operations, and the whole tree is stored back
//! into the record as plain JSON.

use crate::record::ID_FIELD;
use crate::schema::{FieldDescriptor, Schema};
use crate::sdl::types_to_sdl;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallcrud_core::{CrudError, CrudResult, Persistable, TypeDescriptor, Validatable};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// Name of the built-in definition schema
pub const DEFINITION_SCHEMA: &str = "definition";

// ============================================================================
// Tree nodes
// ============================================================================

/// One field inside a type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Stable key for list rendering; not persisted
    #[serde(skip, default = "Uuid::new_v4")]
    pub key: Uuid,

    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl FieldDefinition {
    /// Create a new field definition
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            key: Uuid::new_v4(),
            name: name.into(),
            ty,
        }
    }
}

/// One type definition: a name plus ordered fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Stable key for list rendering; not persisted
    #[serde(skip, default = "Uuid::new_v4")]
    pub key: Uuid,

    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    /// Create a new type with an `_id` field
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: Uuid::new_v4(),
            name: name.into(),
            fields: vec![FieldDefinition::new(ID_FIELD, TypeDescriptor::Id)],
        }
    }

    /// View this definition as a schema
    pub fn to_schema(&self) -> Schema {
        Schema {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| FieldDescriptor::new(f.name.clone(), f.ty.clone()))
                .collect(),
        }
    }
}

// Equality ignores the render keys
impl PartialEq for FieldDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

impl PartialEq for TypeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

// ============================================================================
// Definition Tree
// ============================================================================

/// Editable list of type definitions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionTree {
    types: Vec<TypeDefinition>,
}

impl DefinitionTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a tree from a field value
    ///
    /// `null` and the empty string (the default for `Database` fields)
    /// both yield an empty tree.
    pub fn from_value(value: &Value) -> CrudResult<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::String(s) if s.is_empty() => Ok(Self::new()),
            other => Ok(serde_json::from_value(other.clone())?),
        }
    }

    /// Convert the tree back to a field value
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.types
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name,
                        "fields": t.fields.iter().map(|f| serde_json::json!({
                            "name": f.name,
                            "type": f.ty,
                        })).collect::<Vec<_>>(),
                    })
                })
                .collect(),
        )
    }

    /// All type definitions in order
    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Number of type definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the tree has no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// SDL for every type in the tree
    pub fn to_sdl(&self) -> String {
        types_to_sdl(&self.types)
    }

    // ========================================================================
    // Type operations
    // ========================================================================

    /// Append a type, returning its index
    pub fn add_type(&mut self, name: impl Into<String>) -> usize {
        self.types.push(TypeDefinition::new(name));
        self.types.len() - 1
    }

    /// Remove the type at `index`
    pub fn remove_type(&mut self, index: usize) -> CrudResult<TypeDefinition> {
        self.check_type(index)?;
        Ok(self.types.remove(index))
    }

    /// Rename the type at `index`
    pub fn rename_type(&mut self, index: usize, name: impl Into<String>) -> CrudResult<()> {
        self.type_mut(index)?.name = name.into();
        Ok(())
    }

    // ========================================================================
    // Field operations
    // ========================================================================

    /// Append a field to a type, returning the field index
    pub fn add_field(
        &mut self,
        type_index: usize,
        name: impl Into<String>,
        ty: TypeDescriptor,
    ) -> CrudResult<usize> {
        let def = self.type_mut(type_index)?;
        def.fields.push(FieldDefinition::new(name, ty));
        Ok(def.fields.len() - 1)
    }

    /// Remove a field from a type
    pub fn remove_field(
        &mut self,
        type_index: usize,
        field_index: usize,
    ) -> CrudResult<FieldDefinition> {
        let def = self.type_mut(type_index)?;
        check_index("field", field_index, def.fields.len())?;
        Ok(def.fields.remove(field_index))
    }

    /// Rename a field
    pub fn set_field_name(
        &mut self,
        type_index: usize,
        field_index: usize,
        name: impl Into<String>,
    ) -> CrudResult<()> {
        self.field_mut(type_index, field_index)?.name = name.into();
        Ok(())
    }

    /// Change the type of a field
    pub fn set_field_type(
        &mut self,
        type_index: usize,
        field_index: usize,
        ty: TypeDescriptor,
    ) -> CrudResult<()> {
        self.field_mut(type_index, field_index)?.ty = ty;
        Ok(())
    }

    fn check_type(&self, index: usize) -> CrudResult<()> {
        check_index("type", index, self.types.len())
    }

    fn type_mut(&mut self, index: usize) -> CrudResult<&mut TypeDefinition> {
        self.check_type(index)?;
        Ok(&mut self.types[index])
    }

    fn field_mut(
        &mut self,
        type_index: usize,
        field_index: usize,
    ) -> CrudResult<&mut FieldDefinition> {
        let def = self.type_mut(type_index)?;
        check_index("field", field_index, def.fields.len())?;
        Ok(&mut def.fields[field_index])
    }
}

fn check_index(kind: &'static str, index: usize, len: usize) -> CrudResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(CrudError::IndexOutOfRange { kind, index })
    }
}

impl Validatable for DefinitionTree {
    fn validate(&self) -> CrudResult<()> {
        let mut names = HashSet::new();
        for def in &self.types {
            def.to_schema().validate()?;
            if !names.insert(def.name.as_str()) {
                return Err(CrudError::invalid_schema(
                    &def.name,
                    "Type is defined more than once",
                ));
            }
        }
        Ok(())
    }
}

impl Persistable for DefinitionTree {}

/// The built-in schema for editing definitions
pub fn definition_schema() -> Schema {
    Schema::new(DEFINITION_SCHEMA)
        .with_field(FieldDescriptor::new(ID_FIELD, TypeDescriptor::Id))
        .with_field(FieldDescriptor::new("name", TypeDescriptor::String))
        .with_field(FieldDescriptor::new("gql", TypeDescriptor::String).with_label("GraphQL"))
        .with_field(FieldDescriptor::new("types", TypeDescriptor::Database))
}

/// Load the schema a screen shows: the file at `path`, else the definition schema
pub fn load_schema(path: Option<&Path>) -> CrudResult<Schema> {
    let Some(path) = path else {
        return Ok(definition_schema());
    };
    let schema = Schema::load_from_file(path)?;
    schema.validate()?;
    tracing::debug!(schema = %schema.name, path = %path.display(), "Loaded schema");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> DefinitionTree {
        let mut tree = DefinitionTree::new();
        let friend = tree.add_type("friend");
        tree.add_field(friend, "name", TypeDescriptor::String).unwrap();
        tree
    }

    #[test]
    fn test_new_type_has_id_field() {
        let tree = sample();
        assert_eq!(
            tree.to_value(),
            json!([{
                "name": "friend",
                "fields": [
                    {"name": "_id", "type": {"name": "ID"}},
                    {"name": "name", "type": {"name": "String"}}
                ]
            }])
        );
    }

    #[test]
    fn test_value_round_trip() {
        let value = sample().to_value();
        let tree = DefinitionTree::from_value(&value).unwrap();
        assert_eq!(tree.to_value(), value);
    }

    #[test]
    fn test_empty_values_yield_empty_tree() {
        assert!(DefinitionTree::from_value(&json!("")).unwrap().is_empty());
        assert!(DefinitionTree::from_value(&Value::Null).unwrap().is_empty());
        assert!(DefinitionTree::from_value(&json!(42)).is_err());
    }

    #[test]
    fn test_field_operations() {
        let mut tree = sample();
        tree.set_field_name(0, 1, "title").unwrap();
        tree.set_field_type(0, 1, TypeDescriptor::Html).unwrap();
        let idx = tree.add_field(0, "age", TypeDescriptor::Int).unwrap();
        assert_eq!(idx, 2);

        let removed = tree.remove_field(0, 0).unwrap();
        assert_eq!(removed.name, "_id");

        let names: Vec<&str> = tree.types()[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["title", "age"]);
        assert_eq!(tree.types()[0].fields[0].ty, TypeDescriptor::Html);
    }

    #[test]
    fn test_type_operations() {
        let mut tree = sample();
        let second = tree.add_type("document");
        tree.rename_type(second, "doc").unwrap();
        assert_eq!(tree.types()[1].name, "doc");
        tree.remove_type(0).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.types()[0].name, "doc");
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut tree = sample();
        assert!(matches!(
            tree.remove_type(5),
            Err(CrudError::IndexOutOfRange { kind: "type", index: 5 })
        ));
        assert!(matches!(
            tree.set_field_name(0, 9, "x"),
            Err(CrudError::IndexOutOfRange { kind: "field", index: 9 })
        ));
    }

    #[test]
    fn test_validation_rejects_duplicate_types() {
        let mut tree = sample();
        assert!(tree.is_valid());
        tree.add_type("friend");
        assert!(!tree.is_valid());
    }

    #[test]
    fn test_definition_schema_shape() {
        let schema = definition_schema();
        assert_eq!(schema.field_names(), vec!["_id", "name", "gql", "types"]);
        assert_eq!(schema.field("types").unwrap().ty, TypeDescriptor::Database);
    }

    #[test]
    fn test_load_schema_defaults_to_definition() {
        let schema = load_schema(None).unwrap();
        assert_eq!(schema.name, DEFINITION_SCHEMA);
        assert_eq!(schema.field_names(), vec!["_id", "name", "gql", "types"]);
    }

    #[test]
    fn test_trees_from_same_json_are_equal() {
        let value = json!([
            {"name": "friend", "fields": [
                {"name": "_id", "type": {"name": "ID"}},
                {"name": "age", "type": {"name": "Int"}}
            ]}
        ]);
        let first = DefinitionTree::from_value(&value).unwrap();
        let second = DefinitionTree::from_value(&value).unwrap();
        assert_ne!(first.types()[0].key, second.types()[0].key);
        assert_eq!(first, second);

        let mut renamed = second.clone();
        renamed.rename_type(0, "foe").unwrap();
        assert_ne!(first, renamed);
    }

    #[test]
    fn test_load_schema_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("friend.json");
        std::fs::write(
            &path,
            r#"{"name": "friend", "fields": [{"name": "name", "type": {"name": "String"}}]}"#,
        )
        .unwrap();
        let schema = load_schema(Some(&path)).unwrap();
        assert_eq!(schema.name, "friend");

        std::fs::write(&path, r#"{"name": "", "fields": []}"#).unwrap();
        assert!(load_schema(Some(&path)).is_err());
    }
}
