//! # smallcrud UI
//!
//! Dioxus desktop front end for one schema-driven CRUD screen.
//!
//! ## Features
//!
//! - Search table with sortable headers, pager and delete confirmation
//! - Create, edit, read and filter dialogs driven by the view resolvers
//! - Image upload through a native file picker
//! - Nested schema editor for `Database` fields
//! - Status bar reporting failed operations
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::App;
pub use file_ops::{pick_and_upload, show_image_dialog};
pub use state::{
    ScreenSetup, SignalState, StatusLevel, StatusMessage, StatusSink, UiOrchestrator,
};

pub use components::{
    ConfirmDeleteDialog, CreateDialog, CrudTable, DisplayCell, EditDialog, FieldInput,
    FilterDialog, Modal, ReadDialog, SchemaEditor,
};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "smallcrud";

/// Stylesheet embedded at build time
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the desktop screen for `setup`
///
/// # Example
///
/// ```rust,ignore
/// let setup = ScreenSetup::new(schema, config, processors);
/// smallcrud_ui::launch(setup);
/// ```
pub fn launch(setup: ScreenSetup) {
    launch_with_size(setup, 1200.0, 800.0);
}

/// Launch with a custom window size
pub fn launch_with_size(setup: ScreenSetup, width: f64, height: f64) {
    let title = setup.title();
    tracing::info!(schema = %setup.schema.name, "Starting {} v{}", NAME, VERSION);

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(title)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(width, height))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(640.0, 480.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .with_context(setup)
        .launch(App);
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_styles_loaded() {
        assert!(STYLES.contains(".crud-table"));
        assert!(STYLES.contains(".modal-backdrop"));
    }
}
