#![deny(missing_docs)]

//! # Usage Classification
//!
//! Walks the `paths` section and tags every transitively reachable schema as
//! used in requests, responses, or both. Parameters count toward the
//! response side, so a type referenced from a parameter is never treated as
//! request-body-only.

use crate::oas::models::SchemaNode;
use crate::oas::schemas::{collect_references, ref_target};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Where a schema is reachable from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// Reachable only through request bodies.
    Request,
    /// Reachable only through responses or parameters.
    Response,
    /// Reachable through both sides.
    Both,
}

/// Reachability per schema name. Names never used under `paths` are absent.
#[derive(Debug, Default, Clone)]
pub struct UsageMap {
    usage: HashMap<String, Usage>,
}

impl UsageMap {
    /// True if `name` is reachable only from request bodies.
    pub fn is_request_body_only(&self, name: &str) -> bool {
        matches!(self.usage.get(name), Some(Usage::Request))
    }

    /// Classification for `name`, if it is used under `paths` at all.
    pub fn get(&self, name: &str) -> Option<Usage> {
        self.usage.get(name).copied()
    }
}

/// Classifies every schema reachable from `paths`.
///
/// Seeds are the `$ref` targets under request bodies on one side and under
/// responses and parameters on the other; each side is then transitively
/// closed over the schema reference graph.
pub fn classify_usage(paths: &Value, schemas: &IndexMap<String, SchemaNode>) -> UsageMap {
    let mut request_seeds = BTreeSet::new();
    let mut response_seeds = BTreeSet::new();

    if let Some(path_items) = paths.as_object() {
        for path_item in path_items.values() {
            let Some(operations) = path_item.as_object() else {
                continue;
            };
            for operation in operations.values() {
                let Some(operation) = operation.as_object() else {
                    continue;
                };
                if let Some(body) = operation.get("requestBody") {
                    collect_ref_targets(body, &mut request_seeds);
                }
                if let Some(responses) = operation.get("responses") {
                    collect_ref_targets(responses, &mut response_seeds);
                }
                if let Some(parameters) = operation.get("parameters") {
                    collect_ref_targets(parameters, &mut response_seeds);
                }
            }
        }
    }

    let request_set = close_over_references(&request_seeds, schemas);
    let response_set = close_over_references(&response_seeds, schemas);

    let mut usage = HashMap::new();
    for name in request_set.union(&response_set) {
        let classification = match (request_set.contains(name), response_set.contains(name)) {
            (true, true) => Usage::Both,
            (true, false) => Usage::Request,
            _ => Usage::Response,
        };
        usage.insert(name.clone(), classification);
    }

    UsageMap { usage }
}

/// Collects the target name of every `$ref` in a raw subtree.
///
/// Scanning the raw tree instead of just the top-level `schema` key also
/// catches inline bodies that reference named schemas somewhere inside.
fn collect_ref_targets(value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "$ref" {
                    if let Some(ref_str) = child.as_str() {
                        out.insert(ref_target(ref_str));
                    }
                } else {
                    collect_ref_targets(child, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_ref_targets(item, out);
            }
        }
        _ => {}
    }
}

/// Transitive closure of `seeds` over the schema reference graph.
///
/// Visited tracking is by name, so self-referential and mutually referential
/// types terminate.
fn close_over_references(
    seeds: &BTreeSet<String>,
    schemas: &IndexMap<String, SchemaNode>,
) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    let mut pending: Vec<String> = seeds.iter().cloned().collect();

    while let Some(name) = pending.pop() {
        if !visited.insert(name.clone()) {
            continue;
        }
        if let Some(node) = schemas.get(&name) {
            let mut referenced = BTreeSet::new();
            collect_references(node, &mut referenced);
            pending.extend(referenced);
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::schemas::parse_schema;
    use serde_json::json;

    fn schemas_from(value: Value) -> IndexMap<String, SchemaNode> {
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(name, schema)| (name.clone(), parse_schema(schema)))
            .collect()
    }

    #[test]
    fn test_request_body_only_classification() {
        let paths = json!({
            "/people": {
                "post": {
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreatePerson" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Person" }
                                }
                            }
                        }
                    }
                }
            }
        });
        let schemas = schemas_from(json!({
            "CreatePerson": { "type": "object" },
            "Person": { "type": "object" }
        }));

        let usage = classify_usage(&paths, &schemas);
        assert!(usage.is_request_body_only("CreatePerson"));
        assert_eq!(usage.get("Person"), Some(Usage::Response));
    }

    #[test]
    fn test_type_on_both_sides_is_both() {
        let paths = json!({
            "/people": {
                "put": {
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Person" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Person" }
                                }
                            }
                        }
                    }
                }
            }
        });
        let schemas = schemas_from(json!({ "Person": { "type": "object" } }));

        let usage = classify_usage(&paths, &schemas);
        assert_eq!(usage.get("Person"), Some(Usage::Both));
        assert!(!usage.is_request_body_only("Person"));
    }

    #[test]
    fn test_closure_follows_references() {
        let paths = json!({
            "/people": {
                "post": {
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreatePerson" }
                            }
                        }
                    }
                }
            }
        });
        let schemas = schemas_from(json!({
            "CreatePerson": {
                "type": "object",
                "properties": { "home": { "$ref": "#/components/schemas/Address" } }
            },
            "Address": { "type": "object" }
        }));

        let usage = classify_usage(&paths, &schemas);
        assert!(usage.is_request_body_only("Address"));
    }

    #[test]
    fn test_reference_cycle_terminates() {
        let paths = json!({
            "/nodes": {
                "get": {
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/TreeNode" }
                                }
                            }
                        }
                    }
                }
            }
        });
        let schemas = schemas_from(json!({
            "TreeNode": {
                "type": "object",
                "properties": {
                    "children": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/TreeNode" }
                    }
                }
            }
        }));

        let usage = classify_usage(&paths, &schemas);
        assert_eq!(usage.get("TreeNode"), Some(Usage::Response));
    }

    #[test]
    fn test_parameter_reference_counts_as_response_side() {
        let paths = json!({
            "/people": {
                "post": {
                    "parameters": [
                        { "name": "filter", "in": "query",
                          "schema": { "$ref": "#/components/schemas/Filter" } }
                    ],
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Filter" }
                            }
                        }
                    }
                }
            }
        });
        let schemas = schemas_from(json!({ "Filter": { "type": "object" } }));

        let usage = classify_usage(&paths, &schemas);
        assert!(!usage.is_request_body_only("Filter"));
        assert_eq!(usage.get("Filter"), Some(Usage::Both));
    }

    #[test]
    fn test_unused_schema_is_absent() {
        let paths = json!({});
        let schemas = schemas_from(json!({ "Orphan": { "type": "object" } }));
        let usage = classify_usage(&paths, &schemas);
        assert_eq!(usage.get("Orphan"), None);
    }
}
