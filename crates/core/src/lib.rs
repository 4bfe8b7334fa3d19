//! # smallcrud Core
//!
//! Core types, traits, configuration and error handling for smallcrud.
//!
//! This crate provides the foundational building blocks used by the
//! schema, gateway, view and UI crates:
//!
//! - **Types**: The field-type taxonomy (`TypeDescriptor`), filter operators and sort order
//! - **Traits**: `Validatable` and `Persistable`
//! - **Config**: `CrudConfig` loaded from TOML with environment overrides
//! - **Errors**: Unified error handling with `CrudError` and `CrudResult`
//!

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::CrudConfig;
pub use error::{CrudError, CrudResult, ResultExt};
pub use traits::{Persistable, Validatable};
pub use types::{Operator, SortOrder, TypeDescriptor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
