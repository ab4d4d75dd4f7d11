#![deny(missing_docs)]

//! # Document Loading
//!
//! Parses the raw OpenAPI text (YAML or JSON) into the generic tree and
//! checks for the top-level sections the converter depends on. File and
//! stream I/O stays in the CLI; this module only sees text.

use crate::error::{AppError, AppResult};
use crate::oas::models::SchemaNode;
use crate::oas::schemas::parse_schema;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Explicit input format hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Input is YAML.
    Yaml,
    /// Input is JSON.
    Json,
}

/// A loaded OpenAPI document, reduced to what the converter needs.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    /// Named schema definitions in declaration order.
    pub schemas: IndexMap<String, SchemaNode>,
    /// The raw `paths` subtree, kept for usage classification.
    pub paths: Value,
}

/// Typed shim over the top-level structure; everything else is ignored.
#[derive(Debug, Deserialize)]
struct ShimDocument {
    components: Option<ShimComponents>,
    paths: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ShimComponents {
    schemas: Option<IndexMap<String, Value>>,
}

/// Parses an OpenAPI document from YAML or JSON text.
///
/// Without an explicit hint, JSON is attempted for content that starts with
/// `{` and YAML otherwise. Missing `components.schemas` or `paths` is a
/// fatal structure error.
pub fn parse_document(
    content: &str,
    format: Option<DocumentFormat>,
) -> AppResult<OpenApiDocument> {
    let tree = parse_tree(content, format)?;

    let shim: ShimDocument = serde_json::from_value(tree)
        .map_err(|e| AppError::Structure(format!("unexpected top-level shape: {}", e)))?;

    let raw_schemas = shim
        .components
        .and_then(|c| c.schemas)
        .ok_or_else(|| AppError::Structure("document has no 'components.schemas' section".into()))?;

    let paths = shim
        .paths
        .ok_or_else(|| AppError::Structure("document has no 'paths' section".into()))?;

    let mut schemas = IndexMap::new();
    for (name, value) in &raw_schemas {
        schemas.insert(name.clone(), parse_schema(value));
    }

    Ok(OpenApiDocument { schemas, paths })
}

fn parse_tree(content: &str, format: Option<DocumentFormat>) -> AppResult<Value> {
    match format.unwrap_or_else(|| infer_format(content)) {
        DocumentFormat::Json => serde_json::from_str(content)
            .map_err(|e| AppError::Parse(format!("invalid JSON: {}", e))),
        DocumentFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| AppError::Parse(format!("invalid YAML: {}", e))),
    }
}

fn infer_format(content: &str) -> DocumentFormat {
    if content.trim_start().starts_with('{') {
        DocumentFormat::Json
    } else {
        DocumentFormat::Yaml
    }
}
