#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **document**: Loading and top-level structure checks.
//! - **models**: Intermediate representation of schema definitions.
//! - **schemas**: Generic tree -> `SchemaNode` parsing.
//! - **usage**: Request/response reachability classification.

pub mod document;
pub mod models;
pub mod schemas;
pub mod usage;

pub use document::{parse_document, DocumentFormat, OpenApiDocument};
pub use models::{PrimitiveType, SchemaNode};
pub use schemas::{collect_references, parse_schema};
pub use usage::{classify_usage, Usage, UsageMap};
