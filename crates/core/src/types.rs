//! Core types used throughout smallcrud
//!
//! This module contains the field-type taxonomy shared by every layer
//! (defaults, resolvers, gateway and SDL generation), plus the small
//! enums that make up the structured query model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Descriptor
// ============================================================================

/// Value type of a schema field
///
/// Serialized in the same shape the schema files use: an object with a
/// `name` tag plus optional `values` (Enum) or `data` (Code, Image).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawType", into = "RawType")]
pub enum TypeDescriptor {
    /// Server-assigned identifier
    Id,
    /// Single-line text
    String,
    /// Rich text stored as markup
    Html,
    /// Source code; `data` is forwarded to the editor/viewer verbatim
    Code { data: Value },
    /// Image URL; `data.action` overrides the upload target
    Image { data: Value },
    /// Integer number
    Int,
    /// Floating point number
    Float,
    /// Boolean true/false
    Boolean,
    /// Timestamp
    DateTime,
    /// One of a fixed list of values, the first being the default
    Enum { values: Vec<String> },
    /// Nested list of `{name, fields}` definitions
    Database,
    /// Any tag outside the known set
    Other(String),
}

impl TypeDescriptor {
    /// Wire tag as it appears in schema files
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Id => "ID",
            TypeDescriptor::String => "String",
            TypeDescriptor::Html => "HTML",
            TypeDescriptor::Code { .. } => "Code",
            TypeDescriptor::Image { .. } => "Image",
            TypeDescriptor::Int => "Int",
            TypeDescriptor::Float => "Float",
            TypeDescriptor::Boolean => "Boolean",
            TypeDescriptor::DateTime => "DateTime",
            TypeDescriptor::Enum { .. } => "Enum",
            TypeDescriptor::Database => "Database",
            TypeDescriptor::Other(tag) => tag,
        }
    }

    /// Every known tag, in the order offered by type pickers
    pub fn all_tags() -> &'static [&'static str] {
        &[
            "ID", "String", "HTML", "Code", "Image", "Int", "Float", "Boolean", "DateTime", "Enum",
            "Database",
        ]
    }

    /// Build a descriptor from a bare tag with empty extras
    pub fn from_tag(tag: &str) -> Self {
        RawType {
            name: tag.to_string(),
            values: Vec::new(),
            data: Value::Null,
        }
        .into()
    }

    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeDescriptor::Int | TypeDescriptor::Float)
    }

    /// Check if the tag is outside the known set
    pub fn is_other(&self) -> bool {
        matches!(self, TypeDescriptor::Other(_))
    }

    /// Opaque configuration bag (Code and Image only)
    pub fn data(&self) -> Option<&Value> {
        match self {
            TypeDescriptor::Code { data } | TypeDescriptor::Image { data } => Some(data),
            _ => None,
        }
    }

    /// GraphQL scalar used when emitting SDL for this type
    pub fn gql_type(&self) -> &'static str {
        match self {
            TypeDescriptor::Id => "ID",
            TypeDescriptor::Int => "Int",
            TypeDescriptor::Float => "Float",
            TypeDescriptor::Boolean => "Boolean",
            TypeDescriptor::DateTime => "DateTime",
            TypeDescriptor::Database => "JSON",
            _ => "String",
        }
    }
}

impl Default for TypeDescriptor {
    fn default() -> Self {
        TypeDescriptor::String
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Enum { values } => write!(f, "Enum({})", values.join(", ")),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Serialized form of a type descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawType {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    values: Vec<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
}

impl From<RawType> for TypeDescriptor {
    fn from(raw: RawType) -> Self {
        match raw.name.as_str() {
            "ID" => TypeDescriptor::Id,
            "String" => TypeDescriptor::String,
            "HTML" => TypeDescriptor::Html,
            "Code" => TypeDescriptor::Code { data: raw.data },
            "Image" => TypeDescriptor::Image { data: raw.data },
            "Int" => TypeDescriptor::Int,
            "Float" => TypeDescriptor::Float,
            "Boolean" => TypeDescriptor::Boolean,
            "DateTime" => TypeDescriptor::DateTime,
            "Enum" => TypeDescriptor::Enum { values: raw.values },
            "Database" => TypeDescriptor::Database,
            _ => TypeDescriptor::Other(raw.name),
        }
    }
}

impl From<TypeDescriptor> for RawType {
    fn from(ty: TypeDescriptor) -> Self {
        let name = ty.name().to_string();
        match ty {
            TypeDescriptor::Code { data } | TypeDescriptor::Image { data } => RawType {
                name,
                values: Vec::new(),
                data,
            },
            TypeDescriptor::Enum { values } => RawType {
                name,
                values,
                data: Value::Null,
            },
            _ => RawType {
                name,
                values: Vec::new(),
                data: Value::Null,
            },
        }
    }
}

// ============================================================================
// Query Operators
// ============================================================================

/// Comparison operator of a filter predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl Operator {
    /// Get all operators in picker order
    pub fn all() -> &'static [Operator] {
        &[
            Operator::Eq,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
        ]
    }

    /// Symbol shown to the user
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }

    /// Key the backend expects around the value; `None` for equality
    pub fn wire_tag(&self) -> Option<&'static str> {
        match self {
            Operator::Eq => None,
            Operator::Gt => Some("__gt"),
            Operator::Gte => Some("__gte"),
            Operator::Lt => Some("__lt"),
            Operator::Lte => Some("__lte"),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::all()
            .iter()
            .copied()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| format!("unknown operator '{}'", s))
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Numeric direction used on the wire
    pub fn direction(&self) -> i64 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
