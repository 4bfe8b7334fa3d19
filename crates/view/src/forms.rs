//! Create and edit forms
//!
//! Forms own a working copy of the record. `submit` hands out a detached
//! snapshot and leaves the form untouched; resetting or closing is the
//! caller's job.

use crate::resolve::{InputBinding, InputContext, render_input, value_from_input};
use chrono::{DateTime, Utc};
use serde_json::Value;
use smallcrud_core::{CrudError, CrudResult};
use smallcrud_schema::{FieldDescriptor, ID_FIELD, Record, Schema, defaults_at};
use std::sync::Arc;

// ============================================================================
// Create Form
// ============================================================================

/// Form for a new record, seeded from defaults (without `_id`)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateForm {
    schema: Arc<Schema>,
    fields: Vec<FieldDescriptor>,
    values: Record,
}

impl CreateForm {
    /// Create a form with defaults captured now
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::at(schema, Utc::now())
    }

    /// Create a form with defaults captured at `now`
    pub fn at(schema: Arc<Schema>, now: DateTime<Utc>) -> Self {
        let fields = schema.editable_fields();
        let values = defaults_at(&fields, now);
        Self {
            schema,
            fields,
            values,
        }
    }

    /// Fields shown by the form
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Current values
    pub fn values(&self) -> &Record {
        &self.values
    }

    /// Set one field
    pub fn set(&mut self, name: &str, value: Value) -> CrudResult<()> {
        if name == ID_FIELD {
            return Err(CrudError::ReadOnlyField(name.to_string()));
        }
        if !self.fields.iter().any(|f| f.name == name) {
            return Err(CrudError::UnknownField {
                schema: self.schema.name.clone(),
                field: name.to_string(),
            });
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Set one field from raw control text; unparseable text is ignored
    pub fn set_input(&mut self, name: &str, raw: &str) -> CrudResult<()> {
        let field = self.schema.require_field(name)?;
        match value_from_input(&field.ty, raw) {
            Some(value) => self.set(name, value),
            None => Ok(()),
        }
    }

    /// Detached snapshot of the current values
    pub fn submit(&self) -> Record {
        self.values.clone()
    }

    /// Re-seed every field from defaults
    pub fn reset(&mut self) {
        self.values = defaults_at(&self.fields, Utc::now());
    }

    /// One bound control per field, in schema order
    pub fn bindings(&self, ctx: &InputContext) -> Vec<InputBinding> {
        self.fields
            .iter()
            .map(|f| render_input(&self.values, f, ctx))
            .collect()
    }
}

// ============================================================================
// Edit Form
// ============================================================================

/// Form for an existing record, seeded from defaults overlaid with the record
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    schema: Arc<Schema>,
    values: Record,
}

impl EditForm {
    /// Create a form with no record loaded
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = defaults_at(&schema.fields, Utc::now());
        Self { schema, values }
    }

    /// Create a form for `record`
    pub fn for_record(schema: Arc<Schema>, record: &Record) -> Self {
        let mut form = Self::new(schema);
        form.load(record);
        form
    }

    /// Re-seed every field for a new record
    ///
    /// Nothing from the previously loaded record survives.
    pub fn load(&mut self, record: &Record) {
        let mut values = defaults_at(&self.schema.fields, Utc::now());
        values.overlay(record);
        self.values = values;
    }

    /// Current values, including `_id`
    pub fn values(&self) -> &Record {
        &self.values
    }

    /// Set one field; `_id` is not editable
    pub fn set(&mut self, name: &str, value: Value) -> CrudResult<()> {
        let field = self.schema.require_field(name)?;
        if field.is_id() {
            return Err(CrudError::ReadOnlyField(name.to_string()));
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Set one field from raw control text; unparseable text is ignored
    pub fn set_input(&mut self, name: &str, raw: &str) -> CrudResult<()> {
        let field = self.schema.require_field(name)?;
        match value_from_input(&field.ty, raw) {
            Some(value) => self.set(name, value),
            None => Ok(()),
        }
    }

    /// Detached snapshot including `_id`
    pub fn submit(&self) -> Record {
        self.values.clone()
    }

    /// One bound control per schema field, `_id` read-only
    pub fn bindings(&self, ctx: &InputContext) -> Vec<InputBinding> {
        self.schema
            .fields
            .iter()
            .map(|f| render_input(&self.values, f, ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::InputControl;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use smallcrud_core::TypeDescriptor;

    fn friend() -> Arc<Schema> {
        Arc::new(
            Schema::new("friend")
                .with_field(FieldDescriptor::new("_id", TypeDescriptor::Id))
                .with_field(FieldDescriptor::new("name", TypeDescriptor::String))
                .with_field(FieldDescriptor::new("age", TypeDescriptor::Int))
                .with_field(FieldDescriptor::new("joined", TypeDescriptor::DateTime)),
        )
    }

    #[test]
    fn test_create_form_excludes_id() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let form = CreateForm::at(friend(), now);
        assert_eq!(
            form.submit().into_value(),
            json!({"name": "", "age": 0, "joined": "2024-01-02T03:04:05.000Z"})
        );
        assert_eq!(form.bindings(&InputContext::default()).len(), 3);
    }

    #[test]
    fn test_create_form_set_and_snapshot() {
        let mut form = CreateForm::new(friend());
        form.set("name", json!("Ann")).unwrap();
        let snapshot = form.submit();
        form.set("name", json!("Changed")).unwrap();
        assert_eq!(snapshot.get("name"), Some(&json!("Ann")));
        assert_eq!(form.values().get("name"), Some(&json!("Changed")));
    }

    #[test]
    fn test_create_form_rejects_id_and_unknown() {
        let mut form = CreateForm::new(friend());
        assert!(matches!(
            form.set("_id", json!("x")),
            Err(CrudError::ReadOnlyField(_))
        ));
        assert!(matches!(
            form.set("nope", json!(1)),
            Err(CrudError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_set_input_coerces_numbers() {
        let mut form = CreateForm::new(friend());
        form.set_input("age", "41").unwrap();
        form.set_input("age", "forty").unwrap();
        assert_eq!(form.values().get("age"), Some(&json!(41)));
    }

    #[test]
    fn test_create_form_reset() {
        let mut form = CreateForm::new(friend());
        form.set("name", json!("Ann")).unwrap();
        form.reset();
        assert_eq!(form.values().get("name"), Some(&json!("")));
    }

    #[test]
    fn test_edit_form_reseeds_on_load() {
        let first = Record::new()
            .with("_id", json!("1"))
            .with("name", json!("Ann"))
            .with("age", json!(30));
        let second = Record::new().with("_id", json!("2")).with("name", json!("Bo"));

        let mut form = EditForm::for_record(friend(), &first);
        form.load(&second);

        let values = form.submit();
        assert_eq!(values.get("_id"), Some(&json!("2")));
        assert_eq!(values.get("name"), Some(&json!("Bo")));
        assert_eq!(values.get("age"), Some(&json!(0)));
    }

    #[test]
    fn test_edit_form_id_is_read_only() {
        let record = Record::new().with("_id", json!("1"));
        let mut form = EditForm::for_record(friend(), &record);
        assert!(form.set("_id", json!("2")).is_err());
        form.set("name", json!("Cy")).unwrap();

        let bindings = form.bindings(&InputContext::default());
        assert_eq!(
            bindings[0].control,
            InputControl::Text {
                value: "1".into(),
                readonly: true
            }
        );
        assert_eq!(form.submit().get("name"), Some(&json!("Cy")));
    }
}
