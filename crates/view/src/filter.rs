//! Filter builder
//!
//! An ordered list of predicate rows edited by index. Rows without a
//! field name are dropped on submit rather than rejected.

use crate::resolve::value_from_input;
use serde_json::Value;
use smallcrud_core::{CrudError, CrudResult, Operator};
use smallcrud_schema::{Predicate, Schema};
use std::sync::Arc;

/// Editable filter rows for one schema
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBuilder {
    schema: Arc<Schema>,
    rows: Vec<Predicate>,
}

impl FilterBuilder {
    /// Create an empty builder
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Create a builder pre-filled with an existing filter
    pub fn from_filter(schema: Arc<Schema>, filter: &[Predicate]) -> Self {
        Self {
            schema,
            rows: filter.to_vec(),
        }
    }

    /// Current rows
    pub fn rows(&self) -> &[Predicate] {
        &self.rows
    }

    /// Field names a row may refer to
    pub fn field_options(&self) -> Vec<&str> {
        self.schema.field_names()
    }

    /// Operators a row may use
    pub fn operators(&self) -> &'static [Operator] {
        Operator::all()
    }

    /// Append a blank row, returning its index
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Predicate::blank());
        self.rows.len() - 1
    }

    /// Remove the row at `index`
    pub fn remove_row(&mut self, index: usize) -> CrudResult<Predicate> {
        self.check(index)?;
        Ok(self.rows.remove(index))
    }

    /// Point a row at a field; the empty name clears it
    ///
    /// A value already entered is re-typed for the new field.
    pub fn set_field(&mut self, index: usize, name: &str) -> CrudResult<()> {
        self.check(index)?;
        if !name.is_empty() {
            self.schema.require_field(name)?;
        }
        self.rows[index].name = name.to_string();

        let raw = match &self.rows[index].value {
            Value::Null => return Ok(()),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.set_value_input(index, &raw)
    }

    /// Change a row's operator
    pub fn set_operator(&mut self, index: usize, operator: Operator) -> CrudResult<()> {
        self.check(index)?;
        self.rows[index].operator = operator;
        Ok(())
    }

    /// Set a row's value
    pub fn set_value(&mut self, index: usize, value: Value) -> CrudResult<()> {
        self.check(index)?;
        self.rows[index].value = value;
        Ok(())
    }

    /// Set a row's value from raw text, typed after the row's field
    ///
    /// Text that does not parse for the field type is kept as a string.
    pub fn set_value_input(&mut self, index: usize, raw: &str) -> CrudResult<()> {
        self.check(index)?;
        let value = self
            .schema
            .field(&self.rows[index].name)
            .and_then(|f| value_from_input(&f.ty, raw))
            .unwrap_or_else(|| Value::String(raw.to_string()));
        self.rows[index].value = value;
        Ok(())
    }

    /// Rows that name a field
    pub fn submit(&self) -> Vec<Predicate> {
        self.rows
            .iter()
            .filter(|p| p.is_complete())
            .cloned()
            .collect()
    }

    fn check(&self, index: usize) -> CrudResult<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(CrudError::IndexOutOfRange { kind: "row", index })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use smallcrud_core::TypeDescriptor;
    use smallcrud_schema::FieldDescriptor;

    fn people() -> Arc<Schema> {
        Arc::new(
            Schema::new("people")
                .with_field(FieldDescriptor::new("name", TypeDescriptor::String))
                .with_field(FieldDescriptor::new("age", TypeDescriptor::Int)),
        )
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let mut builder = FilterBuilder::new(people());
        let first = builder.add_row();
        builder.add_row();
        builder.set_field(first, "age").unwrap();
        builder.set_operator(first, Operator::Gt).unwrap();
        builder.set_value_input(first, "21").unwrap();

        assert_eq!(
            builder.submit(),
            vec![Predicate::new("age", Operator::Gt, json!(21))]
        );
        assert_eq!(builder.rows().len(), 2);
    }

    #[test]
    fn test_new_rows_default_to_equality() {
        let mut builder = FilterBuilder::new(people());
        let idx = builder.add_row();
        assert_eq!(builder.rows()[idx].operator, Operator::Eq);
    }

    #[test]
    fn test_remove_row_by_index() {
        let mut builder = FilterBuilder::new(people());
        builder.add_row();
        builder.add_row();
        builder.set_field(1, "name").unwrap();
        builder.remove_row(0).unwrap();
        assert_eq!(builder.rows().len(), 1);
        assert_eq!(builder.rows()[0].name, "name");
        assert!(builder.remove_row(4).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut builder = FilterBuilder::new(people());
        builder.add_row();
        assert!(matches!(
            builder.set_field(0, "height"),
            Err(CrudError::UnknownField { .. })
        ));
        builder.set_field(0, "").unwrap();
    }

    #[test]
    fn test_string_value_kept_for_text_fields() {
        let mut builder = FilterBuilder::new(people());
        builder.add_row();
        builder.set_field(0, "name").unwrap();
        builder.set_value_input(0, "42").unwrap();
        assert_eq!(builder.rows()[0].value, json!("42"));
    }

    #[test]
    fn test_value_retyped_when_field_changes() {
        let mut builder = FilterBuilder::new(people());
        builder.add_row();
        builder.set_value_input(0, "21").unwrap();
        assert_eq!(builder.rows()[0].value, json!("21"));

        builder.set_field(0, "age").unwrap();
        assert_eq!(builder.rows()[0].value, json!(21));

        builder.set_field(0, "name").unwrap();
        assert_eq!(builder.rows()[0].value, json!("21"));
    }

    #[test]
    fn test_prefilled_from_existing_filter() {
        let filter = vec![Predicate::eq("name", json!("Ann"))];
        let builder = FilterBuilder::from_filter(people(), &filter);
        assert_eq!(builder.submit(), filter);
        assert_eq!(builder.field_options(), vec!["name", "age"]);
        assert_eq!(builder.operators().len(), 5);
    }
}
