#![deny(missing_docs)]

//! # XSD Output Module
//!
//! - **model**: Output-side representation of XSD constructs.
//! - **mapper**: `SchemaNode` -> `XsdNode` translation.
//! - **serializer**: Rendering into the final `xs:schema` document.

pub mod mapper;
pub mod model;
pub mod serializer;

pub use mapper::TypeMapper;
pub use model::{Particle, Restriction, XsdElement, XsdNode};
pub use serializer::{serialize_schema, TARGET_NAMESPACE, XS_NAMESPACE};
