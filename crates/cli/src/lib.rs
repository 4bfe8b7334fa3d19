//! # smallcrud CLI
//!
//! Command-line access to one schema without the desktop screen.
//!
//! ## Commands
//!
//! - `search` - Run a search with filters, sort and page
//! - `create` - Create a record from JSON, seeded with defaults
//! - `update` - Update a record by `_id`
//! - `delete` - Delete a record by `_id`
//! - `defaults` - Print the create-form defaults of the schema
//! - `sdl` - Print the GraphQL SDL of a definition file
//!

pub mod commands;

use clap::{Args, Parser, Subcommand};
use smallcrud_core::{Operator, SortOrder};
use smallcrud_schema::SortSpec;
use std::path::PathBuf;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "smallcrud-cli",
    version,
    about = "Search and edit schema records over a GraphQL-style endpoint"
)]
pub struct Cli {
    /// Config file (defaults to $SMALLCRUD_CONFIG, then smallcrud.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Schema file; overrides `screen.schema` from the config
    #[arg(short, long, global = true, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Endpoint URL; overrides `endpoint.url` from the config
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a search
    Search(SearchArgs),

    /// Create a record
    Create {
        /// Field values as a JSON object
        #[arg(short, long, value_name = "JSON")]
        data: String,
    },

    /// Update a record identified by its `_id`
    Update {
        /// Field values as a JSON object, including `_id`
        #[arg(short, long, value_name = "JSON")]
        data: String,
    },

    /// Delete a record
    Delete {
        /// Record id
        #[arg(long)]
        id: String,
    },

    /// Print the defaults a new record starts from
    Defaults,

    /// Print the SDL of a definition tree file
    Sdl {
        /// JSON file holding a list of type definitions
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Filter condition such as `age>21` or `name=Ann`; repeatable
    #[arg(short, long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Sort as `field` or `field:asc|desc`
    #[arg(long, value_name = "FIELD[:ORDER]")]
    pub sort: Option<String>,

    /// 1-based page index
    #[arg(long)]
    pub page: Option<u64>,

    /// Rows per page; defaults to `screen.page_size`
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Parsing helpers
// ============================================================================

/// A filter expression split into field, operator and raw value
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub name: String,
    pub operator: Operator,
    pub raw: String,
}

/// Split `age>=21` into its parts
///
/// Two-character operators are matched before one-character ones.
pub fn parse_filter(expr: &str) -> Result<FilterExpr, String> {
    const SYMBOLS: [&str; 5] = [">=", "<=", ">", "<", "="];

    let (pos, symbol) = SYMBOLS
        .iter()
        .filter_map(|s| expr.find(s).map(|pos| (pos, *s)))
        .min_by_key(|(pos, s)| (*pos, std::cmp::Reverse(s.len())))
        .ok_or_else(|| format!("no operator in filter '{}'", expr))?;

    let name = expr[..pos].trim();
    if name.is_empty() {
        return Err(format!("missing field name in filter '{}'", expr));
    }
    let operator: Operator = symbol.parse()?;
    Ok(FilterExpr {
        name: name.to_string(),
        operator,
        raw: expr[pos + symbol.len()..].trim().to_string(),
    })
}

/// Parse `name`, `name:asc` or `name:desc`
pub fn parse_sort(spec: &str) -> Result<SortSpec, String> {
    let (name, order) = match spec.split_once(':') {
        Some((name, order)) => (name.trim(), Some(order.trim().parse::<SortOrder>()?)),
        None => (spec.trim(), None),
    };
    if name.is_empty() {
        return Err(format!("missing field name in sort '{}'", spec));
    }
    Ok(SortSpec {
        name: Some(name.to_string()),
        order: order.or(Some(SortOrder::Ascending)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter_operators() {
        assert_eq!(
            parse_filter("age>=21").unwrap(),
            FilterExpr {
                name: "age".into(),
                operator: Operator::Gte,
                raw: "21".into()
            }
        );
        assert_eq!(parse_filter("age > 3").unwrap().operator, Operator::Gt);
        assert_eq!(parse_filter("name=Ann").unwrap().raw, "Ann");
        assert_eq!(parse_filter("n<=2").unwrap().operator, Operator::Lte);
    }

    #[test]
    fn test_parse_filter_errors() {
        assert!(parse_filter("age").is_err());
        assert!(parse_filter("=3").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_sort("name:desc").unwrap(),
            SortSpec::by("name", SortOrder::Descending)
        );
        assert_eq!(
            parse_sort("name").unwrap(),
            SortSpec::by("name", SortOrder::Ascending)
        );
        assert!(parse_sort(":asc").is_err());
        assert!(parse_sort("name:sideways").is_err());
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "smallcrud-cli",
            "search",
            "-f",
            "age>21",
            "--filter",
            "name=Ann",
            "--sort",
            "name:asc",
            "--page",
            "2",
        ])
        .unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.filters, vec!["age>21", "name=Ann"]);
        assert_eq!(args.page, Some(2));
        assert!(!args.json);
    }

    #[test]
    fn test_global_schema_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["smallcrud-cli", "defaults", "--schema", "friend.json"]).unwrap();
        assert_eq!(cli.schema, Some(PathBuf::from("friend.json")));
    }
}
