//! # smallcrud View
//!
//! Headless building blocks of a CRUD screen.
//!
//! ## Features
//!
//! - **Resolvers**: display, input and read directives per field type
//! - **Forms**: create form seeded with defaults, edit form seeded from a record
//! - **Read view**: label/value rows in schema order
//! - **Search table**: columns, cells and table events with delete confirmation
//! - **Filter builder**: index-based predicate rows
//! - **Orchestrator**: the CRUD state machine over pluggable processors
//!
//! Nothing here draws pixels. The desktop crate maps directives onto widgets.

pub mod filter;
pub mod forms;
pub mod orchestrator;
pub mod processors;
pub mod read;
pub mod resolve;
pub mod sink;
pub mod table;

pub use filter::FilterBuilder;
pub use forms::{CreateForm, EditForm};
pub use orchestrator::{
    CrudOrchestrator, CrudState, Dialog, DialogState, SearchOutcome, SearchTicket, StateHandle,
};
pub use processors::{
    CrudProcessors, DefinitionProcessors, GatewayProcessors, NoopProcessors, processors_for,
};
pub use read::{ReadRow, read_rows};
pub use resolve::{
    DisplayDirective, INVALID_DATE, InputBinding, InputContext, InputControl, render_display,
    render_input, render_read, value_from_input,
};
pub use sink::{ErrorSink, TracingSink};
pub use table::{Column, RowAction, SearchTable, TableEvent, page_count};
