#![deny(missing_docs)]

//! # Schema Parsing
//!
//! Turns one `components.schemas` entry (a generic parsed tree) into a
//! `SchemaNode`. Constructs without an XSD mapping degrade to `xs:string`
//! with a warning rather than aborting the run.

use crate::oas::models::{PrimitiveType, SchemaNode};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::warn;

/// Extracts the schema name from a `$ref` pointer (last segment).
pub(crate) fn ref_target(ref_str: &str) -> String {
    ref_str.rsplit('/').next().unwrap_or(ref_str).to_string()
}

/// Parses one schema definition into the intermediate representation.
///
/// Pattern order matters: `$ref` wins over everything, then `enum`, then the
/// combinators, then the declared `type`. A mapping with `properties` but no
/// declared `type` is treated as an object, matching how SS12000 documents
/// are written.
pub fn parse_schema(value: &Value) -> SchemaNode {
    let Some(map) = value.as_object() else {
        warn!("schema definition is not a mapping, falling back to xs:string");
        return SchemaNode::string();
    };

    if let Some(ref_str) = map.get("$ref").and_then(Value::as_str) {
        return SchemaNode::Reference {
            target: ref_target(ref_str),
        };
    }

    if let Some(values) = map.get("enum").and_then(Value::as_array) {
        return SchemaNode::Enum {
            values: values.iter().map(scalar_to_string).collect(),
        };
    }

    if let Some(branches) = map.get("allOf").and_then(Value::as_array) {
        return SchemaNode::AllOf {
            branches: branches.iter().map(parse_schema).collect(),
        };
    }

    for combinator in ["oneOf", "anyOf"] {
        if let Some(branches) = map.get(combinator).and_then(Value::as_array) {
            return SchemaNode::Choice {
                branches: branches.iter().map(parse_schema).collect(),
            };
        }
    }

    let declared = map.get("type").and_then(Value::as_str);

    if declared == Some("object") || (declared.is_none() && map.contains_key("properties")) {
        let mut properties = IndexMap::new();
        if let Some(props) = map.get("properties").and_then(Value::as_object) {
            for (name, prop) in props {
                properties.insert(name.clone(), parse_schema(prop));
            }
        }
        let required = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<BTreeSet<_>>()
            })
            .unwrap_or_default();
        return SchemaNode::Object {
            properties,
            required,
        };
    }

    if declared == Some("array") {
        let items = map
            .get("items")
            .map(parse_schema)
            .unwrap_or_else(SchemaNode::string);
        return SchemaNode::Array {
            items: Box::new(items),
        };
    }

    match declared {
        Some("string") => primitive(PrimitiveType::String, map),
        Some("integer") => primitive(PrimitiveType::Integer, map),
        Some("number") => primitive(PrimitiveType::Number, map),
        Some("boolean") => primitive(PrimitiveType::Boolean, map),
        Some(other) => {
            warn!(
                construct = other,
                "no XSD mapping for schema type, falling back to xs:string"
            );
            SchemaNode::string()
        }
        // Bare `{}` schemas accept anything; xs:string is the closest fit.
        None => SchemaNode::string(),
    }
}

/// Collects every schema name referenced from `node`, recursively.
///
/// Reference collection does not resolve targets, so cycles in the document
/// cannot recurse here; closure over the name graph happens in the callers.
pub fn collect_references(node: &SchemaNode, out: &mut BTreeSet<String>) {
    match node {
        SchemaNode::Reference { target } => {
            out.insert(target.clone());
        }
        SchemaNode::Object { properties, .. } => {
            for prop in properties.values() {
                collect_references(prop, out);
            }
        }
        SchemaNode::Array { items } => collect_references(items, out),
        SchemaNode::AllOf { branches } | SchemaNode::Choice { branches } => {
            for branch in branches {
                collect_references(branch, out);
            }
        }
        SchemaNode::Enum { .. } | SchemaNode::Primitive { .. } => {}
    }
}

fn primitive(ty: PrimitiveType, map: &serde_json::Map<String, Value>) -> SchemaNode {
    SchemaNode::Primitive {
        ty,
        format: map
            .get("format")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
