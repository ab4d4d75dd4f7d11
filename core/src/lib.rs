#![deny(missing_docs)]

//! # oas2xsd Core
//!
//! Core library for the OpenAPI (SS12000) to XSD converter.
//!
//! The conversion is one synchronous pipeline:
//! load -> classify usage -> resolve filters -> map types -> serialize.

/// Shared error types.
pub mod error;

/// Type selection logic (include/exclude/expand resolution).
pub mod filter;

/// OpenAPI document parsing.
pub mod oas;

/// XSD output model, type mapping and serialization.
pub mod xsd;

pub use error::{AppError, AppResult};
pub use filter::{resolve_selection, FilterConfig, TypeSelection};
pub use oas::{
    classify_usage, parse_document, parse_schema, DocumentFormat, OpenApiDocument, PrimitiveType,
    SchemaNode, Usage, UsageMap,
};
pub use xsd::{serialize_schema, TypeMapper, XsdNode};

/// Converts a loaded OpenAPI document into XSD text with the given filters.
///
/// This is the whole pipeline behind the CLI: usage classification, filter
/// resolution, type mapping and serialization. The returned text is fully
/// assembled, so callers can write it out atomically.
pub fn convert(document: &OpenApiDocument, config: &FilterConfig) -> AppResult<String> {
    let usage = classify_usage(&document.paths, &document.schemas);
    let selection = resolve_selection(config, &document.schemas, &usage);
    let mapper = TypeMapper::new(&document.schemas, &selection);
    let nodes = mapper.map_document();
    serialize_schema(&nodes)
}

/// Parses `content` and converts it in one call.
pub fn convert_str(
    content: &str,
    format: Option<DocumentFormat>,
    config: &FilterConfig,
) -> AppResult<String> {
    let document = parse_document(content, format)?;
    convert(&document, config)
}
