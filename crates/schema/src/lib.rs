//! # smallcrud Schema
//!
//! The declarative model every CRUD screen is rendered from.
//!
//! ## Overview
//!
//! - **Schema**: a record type name plus ordered, typed field descriptors
//! - **Record**: field name to JSON value, with the reserved `_id` key
//! - **Defaults**: the default-value rule that seeds create forms
//! - **Query**: filter/sort/page state with accumulating `with_*` merges
//! - **Definition**: the nested schema-of-schemas edited through `Database` fields
//! - **SDL**: GraphQL type declarations generated from definitions
//!
//! ## Example
//!
//! ```rust,ignore
//! use smallcrud_schema::{Schema, FieldDescriptor, defaults_for};
//! use smallcrud_core::TypeDescriptor;
//!
//! let schema = Schema::new("friend")
//!     .with_field(FieldDescriptor::new("name", TypeDescriptor::String));
//! let record = defaults_for(&schema.fields);
//! ```

pub mod defaults;
pub mod definition;
pub mod query;
pub mod record;
pub mod schema;
pub mod sdl;

pub use defaults::{default_value, defaults_at, defaults_for, format_timestamp};
pub use definition::{
    DEFINITION_SCHEMA, DefinitionTree, FieldDefinition, TypeDefinition, definition_schema, load_schema,
};
pub use query::{PageResult, PageSpec, Predicate, Query, SortSpec};
pub use record::{ID_FIELD, Record};
pub use schema::{FieldDescriptor, Schema, Sortable, capitalize_first};
pub use sdl::types_to_sdl;
