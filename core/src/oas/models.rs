#![deny(missing_docs)]

//! # Intermediate Representation
//!
//! Tagged-variant model of the OpenAPI schema constructs the converter
//! understands. Dynamic attribute probing over the parsed tree happens once,
//! in `schemas::parse_schema`; everything downstream pattern-matches here.

use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Scalar OpenAPI types with a direct XSD mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    /// `type: string` -> `xs:string`.
    String,
    /// `type: integer` -> `xs:integer`.
    Integer,
    /// `type: number` -> `xs:decimal`.
    Number,
    /// `type: boolean` -> `xs:boolean`.
    Boolean,
}

/// One schema definition, named or inline.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// `type: object` with ordered properties.
    Object {
        /// Property name -> schema, in declaration order.
        properties: IndexMap<String, SchemaNode>,
        /// Property names listed under `required`.
        required: BTreeSet<String>,
    },
    /// `type: array` with its item schema.
    Array {
        /// Schema of the repeated item.
        items: Box<SchemaNode>,
    },
    /// `enum` of string values, in declared order.
    Enum {
        /// The enumeration values.
        values: Vec<String>,
    },
    /// A scalar type with an optional `format` hint.
    Primitive {
        /// The base scalar type.
        ty: PrimitiveType,
        /// Raw `format` value, if any (e.g. `date-time`).
        format: Option<String>,
    },
    /// `allOf`: branches merged into one complex type.
    AllOf {
        /// The component schemas, in declared order.
        branches: Vec<SchemaNode>,
    },
    /// `oneOf`/`anyOf`: alternatives mapped to an `xs:choice`.
    Choice {
        /// The alternative schemas, in declared order.
        branches: Vec<SchemaNode>,
    },
    /// `$ref` to another named schema.
    Reference {
        /// Name of the referenced schema (last `$ref` segment).
        target: String,
    },
}

impl SchemaNode {
    /// A plain `xs:string` scalar, the fallback for unmapped constructs.
    pub fn string() -> Self {
        SchemaNode::Primitive {
            ty: PrimitiveType::String,
            format: None,
        }
    }
}
