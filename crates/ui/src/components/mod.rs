//! # UI Components
//!
//! Dioxus components drawing the headless directives of `smallcrud_view`.
//!
//! ## Component Hierarchy
//!
//! ```text
//! CrudTable
//! ├── TableRow (multiple)
//! │   └── DisplayCell (one per column)
//! ├── Pager
//! └── ConfirmDeleteDialog (while a delete is pending)
//!
//! Dialogs
//! ├── CreateDialog / EditDialog
//! │   └── FieldInput (one per field)
//! │       └── SchemaEditor (Database fields)
//! ├── ReadDialog
//! └── FilterDialog
//! ```

pub mod dialogs;
pub mod display;
pub mod inputs;
pub mod schema_editor;
pub mod table;

pub use dialogs::{ConfirmDeleteDialog, CreateDialog, EditDialog, FilterDialog, Modal, ReadDialog};
pub use display::DisplayCell;
pub use inputs::FieldInput;
pub use schema_editor::SchemaEditor;
pub use table::CrudTable;
