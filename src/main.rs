//! smallcrud desktop screen
//!
//! Loads `smallcrud.toml` (or the file given as the first argument),
//! connects the configured schema to its endpoint and opens the window.

use anyhow::{Context, Result};
use smallcrud_core::CrudConfig;
use smallcrud_gateway::{DataGateway, HttpTransport};
use smallcrud_schema::load_schema;
use smallcrud_ui::ScreenSetup;
use smallcrud_view::processors_for;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = CrudConfig::load(explicit.as_deref()).context("Failed to load config")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let schema = Arc::new(
        load_schema(config.screen.schema.as_deref()).context("Failed to load schema")?,
    );
    let transport = HttpTransport::new(config.endpoint.url.clone())
        .context("Failed to build HTTP client")?;
    tracing::info!(endpoint = %transport.url(), schema = %schema.name, "Connecting");

    let gateway = DataGateway::new(schema.clone(), Arc::new(transport));
    let processors = processors_for(gateway);

    smallcrud_ui::launch(ScreenSetup::new(schema, config, processors));
    Ok(())
}
