//! Operation naming and GraphQL document templates
//!
//! For a schema named `N` the backend exposes `N_create`, `N_update`,
//! `N_delete` and `N_find`, with input types `Cap(N)CreateInput` and
//! `Cap(N)UpdateInput`.

use smallcrud_schema::Schema;

/// Operation and input type names for one schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNames {
    pub create: String,
    pub update: String,
    pub delete: String,
    pub find: String,
    pub create_input: String,
    pub update_input: String,
}

impl OperationNames {
    /// Derive every name from the schema name
    pub fn for_schema(schema: &Schema) -> Self {
        let name = &schema.name;
        let ty = schema.type_name();
        Self {
            create: format!("{}_create", name),
            update: format!("{}_update", name),
            delete: format!("{}_delete", name),
            find: format!("{}_find", name),
            create_input: format!("{}CreateInput", ty),
            update_input: format!("{}UpdateInput", ty),
        }
    }

    /// Mutation inserting a list of records
    pub fn create_document(&self) -> String {
        format!(
            "mutation ($data: [{input}!]!) {{ {op}(data: $data) {{ _id }} }}",
            input = self.create_input,
            op = self.create
        )
    }

    /// Mutation updating records matched by a filter
    pub fn update_document(&self) -> String {
        format!(
            "mutation ($filter: JSON! $data: {input}!) {{ {op}(filter: $filter, data: $data) }}",
            input = self.update_input,
            op = self.update
        )
    }

    /// Mutation deleting records matched by a filter
    pub fn delete_document(&self) -> String {
        format!(
            "mutation ($filter: JSON!) {{ {op}(filter: $filter) }}",
            op = self.delete
        )
    }

    /// Query selecting `count` and the given fields of each record
    pub fn search_document(&self, fields: &[&str]) -> String {
        format!(
            "query ($query: QueryInput) {{ {op}(query: $query) {{ count data {{ {fields} }} }} }}",
            op = self.find,
            fields = fields.join(" ")
        )
    }
}
