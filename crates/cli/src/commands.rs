//! Command implementations
//!
//! Each command loads the configuration and schema, builds the processors
//! the desktop screen would use and runs one operation.

use crate::{Cli, Command, SearchArgs, parse_filter, parse_sort};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::Value;
use smallcrud_core::{CrudConfig, Persistable};
use smallcrud_gateway::{DataGateway, HttpTransport};
use smallcrud_schema::{
    DefinitionTree, ID_FIELD, PageResult, PageSpec, Query, Record, Schema, load_schema,
};
use smallcrud_view::{CreateForm, FilterBuilder, SearchTable, processors_for};
use std::sync::Arc;
use tracing::debug;

/// Resolved configuration and schema of one invocation
pub struct Session {
    pub config: CrudConfig,
    pub schema: Arc<Schema>,
}

impl Session {
    /// Load config and schema, applying command-line overrides
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = CrudConfig::load(cli.config.as_deref()).context("Failed to load config")?;
        if let Some(url) = &cli.endpoint {
            config.endpoint.url = url.clone();
        }
        if let Some(schema) = &cli.schema {
            config.screen.schema = Some(schema.clone());
        }
        let schema = load_schema(config.screen.schema.as_deref()).context("Failed to load schema")?;
        debug!(schema = %schema.name, endpoint = %config.endpoint.url, "Session loaded");
        Ok(Self {
            config,
            schema: Arc::new(schema),
        })
    }

    fn gateway(&self) -> Result<DataGateway> {
        let transport = HttpTransport::new(self.config.endpoint.url.clone())?;
        Ok(DataGateway::new(self.schema.clone(), Arc::new(transport)))
    }
}

/// Run the parsed command
pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Sdl { file } => sdl(file),
        Command::Defaults => {
            let ctx = Session::load(&cli)?;
            defaults(&ctx)
        }
        Command::Search(args) => {
            let ctx = Session::load(&cli)?;
            search(&ctx, args).await
        }
        Command::Create { data } => {
            let ctx = Session::load(&cli)?;
            create(&ctx, data).await
        }
        Command::Update { data } => {
            let ctx = Session::load(&cli)?;
            update(&ctx, data).await
        }
        Command::Delete { id } => {
            let ctx = Session::load(&cli)?;
            delete(&ctx, id).await
        }
    }
}

// ============================================================================
// Offline commands
// ============================================================================

fn sdl(file: &std::path::Path) -> Result<()> {
    let tree = DefinitionTree::load_from_file(file)
        .with_context(|| format!("Failed to read definitions from {}", file.display()))?;
    println!("{}", tree.to_sdl());
    Ok(())
}

fn defaults(ctx: &Session) -> Result<()> {
    let form = CreateForm::new(ctx.schema.clone());
    println!("{}", serde_json::to_string_pretty(form.values())?);
    Ok(())
}

// ============================================================================
// Remote commands
// ============================================================================

/// Query built from search flags
pub fn build_query(ctx: &Session, args: &SearchArgs) -> Result<Query> {
    let mut builder = FilterBuilder::new(ctx.schema.clone());
    for expr in &args.filters {
        let parsed = parse_filter(expr).map_err(anyhow::Error::msg)?;
        let row = builder.add_row();
        builder.set_field(row, &parsed.name)?;
        builder.set_operator(row, parsed.operator)?;
        builder.set_value_input(row, &parsed.raw)?;
    }

    let mut query = Query::new().with_filter(builder.submit());
    if let Some(sort) = &args.sort {
        query = query.with_sort(parse_sort(sort).map_err(anyhow::Error::msg)?);
    }
    if args.page.is_some() || args.page_size.is_some() {
        let size = args
            .page_size
            .unwrap_or_else(|| u64::from(ctx.config.screen.page_size));
        query = query.with_page(PageSpec::for_page(args.page.unwrap_or(1), size));
    }
    Ok(query)
}

async fn search(ctx: &Session, args: &SearchArgs) -> Result<()> {
    let query = build_query(ctx, args)?;
    let processors = processors_for(ctx.gateway()?);
    let page = processors.process_search(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&ctx.schema, &page);
    }
    Ok(())
}

async fn create(ctx: &Session, data: &str) -> Result<()> {
    let input = parse_record(data)?;
    let mut form = CreateForm::new(ctx.schema.clone());
    for (name, value) in input.iter() {
        form.set(name, value.clone())?;
    }

    let processors = processors_for(ctx.gateway()?);
    let id = processors.process_create(&form.submit()).await?;
    println!("{} {}", "✓ Created".green().bold(), plain(&id));
    Ok(())
}

/// Record sent by `update`: exactly the keys given in `--data`
///
/// Keys left out are not touched on the server.
pub fn update_payload(schema: &Schema, input: Record) -> Result<Record> {
    if !input.has_id() {
        bail!("update needs an `_id` in --data");
    }
    for name in input.keys().filter(|name| name.as_str() != ID_FIELD) {
        schema.require_field(name)?;
    }
    Ok(input)
}

async fn update(ctx: &Session, data: &str) -> Result<()> {
    let record = update_payload(&ctx.schema, parse_record(data)?)?;

    let processors = processors_for(ctx.gateway()?);
    let ack = processors.process_update(&record).await?;
    report_ack("Updated", record.id(), ack.is_ok());
    Ok(())
}

async fn delete(ctx: &Session, id: &str) -> Result<()> {
    let record = Record::new().with(ID_FIELD, Value::String(id.to_string()));

    let processors = processors_for(ctx.gateway()?);
    let ack = processors.process_delete(&record).await?;
    report_ack("Deleted", record.id(), ack.is_ok());
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn parse_record(data: &str) -> Result<Record> {
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    Record::try_from(value).context("--data must be a JSON object")
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn report_ack(verb: &str, id: Option<&Value>, ok: bool) {
    let id = id.map(plain).unwrap_or_default();
    if ok {
        println!("{} {}", format!("✓ {}", verb).green().bold(), id);
    } else {
        println!("{} {}", "⚠ Not acknowledged".yellow().bold(), id);
    }
}

fn print_page(schema: &Arc<Schema>, page: &PageResult) {
    let table = SearchTable::new(schema.clone());
    let columns = table.columns();

    let header: Vec<String> = columns.iter().map(|c| c.label.clone()).collect();
    println!("{}", header.join("\t").bold());
    for record in &page.data {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| record.get(&c.name).map(plain).unwrap_or_default())
            .collect();
        println!("{}", cells.join("\t"));
    }
    println!(
        "{}",
        format!("{} of {} records", page.data.len(), page.count).dimmed()
    );
}
