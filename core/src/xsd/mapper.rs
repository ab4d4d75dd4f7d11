#![deny(missing_docs)]

//! # Type Mapper
//!
//! Depth-first translation of `SchemaNode` definitions into `XsdNode`s.
//! Expansion (inlining of referenced types) tracks the in-progress name
//! stack so self-referential expand targets terminate with a type reference
//! instead of unbounded output. The stack is traversal-local state passed
//! down the calls, never shared.

use crate::filter::TypeSelection;
use crate::oas::models::{PrimitiveType, SchemaNode};
use crate::xsd::model::{Particle, Restriction, XsdElement, XsdNode};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::warn;

/// Maps the selected schema definitions to XSD constructs.
pub struct TypeMapper<'a> {
    schemas: &'a IndexMap<String, SchemaNode>,
    selection: &'a TypeSelection,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper over `schemas` honoring `selection`.
    pub fn new(schemas: &'a IndexMap<String, SchemaNode>, selection: &'a TypeSelection) -> Self {
        TypeMapper { schemas, selection }
    }

    /// Maps every standalone definition, then one root element per
    /// standalone type, all in declaration order.
    pub fn map_document(&self) -> Vec<XsdNode> {
        let mut definitions = Vec::new();
        let mut roots = Vec::new();

        for name in &self.selection.standalone {
            let Some(schema) = self.schemas.get(name) else {
                continue;
            };
            match schema {
                // A named alias gets a root element pointing at its target
                // instead of a type definition of its own.
                SchemaNode::Reference { target } => {
                    roots.push(XsdNode::Element(XsdElement::typed(
                        name.clone(),
                        tns(target),
                    )));
                }
                _ => {
                    let mut visiting = vec![name.clone()];
                    definitions.push(self.map_definition(
                        Some(name.clone()),
                        schema,
                        &mut visiting,
                    ));
                    roots.push(XsdNode::Element(XsdElement::typed(name.clone(), tns(name))));
                }
            }
        }

        definitions.extend(roots);
        definitions
    }

    /// Maps a schema to a (possibly anonymous) type definition.
    fn map_definition(
        &self,
        name: Option<String>,
        schema: &SchemaNode,
        visiting: &mut Vec<String>,
    ) -> XsdNode {
        match schema {
            SchemaNode::Object {
                properties,
                required,
            } => XsdNode::ComplexType {
                name,
                particle: Particle::Sequence(self.map_properties(properties, required, visiting)),
            },
            SchemaNode::Enum { values } => XsdNode::SimpleType {
                name,
                restriction: Restriction {
                    base: "xs:string".into(),
                    enumerations: values.clone(),
                },
            },
            SchemaNode::Primitive { ty, format } => XsdNode::SimpleType {
                name,
                restriction: Restriction {
                    base: primitive_type(*ty, format.as_deref()),
                    enumerations: Vec::new(),
                },
            },
            // A named array type becomes a complex type holding one
            // repeating `item` element.
            SchemaNode::Array { items } => XsdNode::ComplexType {
                name,
                particle: Particle::Sequence(vec![self
                    .map_property("item", items, false, visiting)
                    .repeated()]),
            },
            SchemaNode::AllOf { branches } => {
                let (properties, required) = self.merge_all_of(branches);
                XsdNode::ComplexType {
                    name,
                    particle: Particle::Sequence(self.map_properties(
                        &properties,
                        &required,
                        visiting,
                    )),
                }
            }
            SchemaNode::Choice { branches } => XsdNode::ComplexType {
                name,
                particle: Particle::Choice(self.map_choice_branches(branches, visiting)),
            },
            SchemaNode::Reference { target } => self.map_reference_definition(name, target, visiting),
        }
    }

    /// Dereferences a `$ref` that appears where a type body is needed
    /// (inline expansion of an alias).
    fn map_reference_definition(
        &self,
        name: Option<String>,
        target: &str,
        visiting: &mut Vec<String>,
    ) -> XsdNode {
        if visiting.iter().any(|n| n == target) {
            warn!(
                schema = %target,
                "reference cycle while inlining, emitting a reference element"
            );
            return XsdNode::ComplexType {
                name,
                particle: Particle::Sequence(vec![
                    XsdElement::typed(target, tns(target)).with_required(true)
                ]),
            };
        }
        match self.schemas.get(target) {
            Some(resolved) => {
                visiting.push(target.to_string());
                let node = self.map_definition(name, resolved, visiting);
                visiting.pop();
                node
            }
            None => {
                warn!(schema = %target, "reference to undeclared schema, emitting empty type");
                XsdNode::ComplexType {
                    name,
                    particle: Particle::Sequence(Vec::new()),
                }
            }
        }
    }

    fn map_properties(
        &self,
        properties: &IndexMap<String, SchemaNode>,
        required: &BTreeSet<String>,
        visiting: &mut Vec<String>,
    ) -> Vec<XsdElement> {
        properties
            .iter()
            .map(|(prop_name, prop)| {
                self.map_property(prop_name, prop, required.contains(prop_name), visiting)
            })
            .collect()
    }

    /// Maps one property to an element, recursing into arrays and inline
    /// bodies.
    fn map_property(
        &self,
        name: &str,
        schema: &SchemaNode,
        required: bool,
        visiting: &mut Vec<String>,
    ) -> XsdElement {
        match schema {
            SchemaNode::Primitive { ty, format } => {
                XsdElement::typed(name, primitive_type(*ty, format.as_deref()))
                    .with_required(required)
            }
            SchemaNode::Reference { target } => self
                .map_reference_property(name, target, visiting)
                .with_required(required),
            SchemaNode::Array { items } => {
                self.map_property(name, items, required, visiting).repeated()
            }
            SchemaNode::Enum { .. }
            | SchemaNode::Object { .. }
            | SchemaNode::AllOf { .. }
            | SchemaNode::Choice { .. } => {
                XsdElement::inline(name, self.map_definition(None, schema, visiting))
                    .with_required(required)
            }
        }
    }

    /// Maps a `$ref` property: a type reference for standalone targets, an
    /// inline body for expand targets.
    fn map_reference_property(
        &self,
        name: &str,
        target: &str,
        visiting: &mut Vec<String>,
    ) -> XsdElement {
        if !self.selection.is_expanded(target) {
            return XsdElement::typed(name, tns(target));
        }
        if visiting.iter().any(|n| n == target) {
            // Self- or mutually-referential expand target: inlining stops at
            // the repeated name and falls back to a reference.
            warn!(
                schema = %target,
                "expand target references itself, falling back to a type reference"
            );
            return XsdElement::typed(name, tns(target));
        }
        match self.schemas.get(target) {
            Some(resolved) => {
                visiting.push(target.to_string());
                let element = XsdElement::inline(name, self.map_definition(None, resolved, visiting));
                visiting.pop();
                element
            }
            None => {
                warn!(schema = %target, "reference to undeclared schema, keeping type reference");
                XsdElement::typed(name, tns(target))
            }
        }
    }

    /// Flattens `allOf` branches into one ordered property map.
    ///
    /// A property is required in the merge only if every branch declaring it
    /// marks it required. Reference branches resolve through the document; a
    /// visited set keeps reference chains finite.
    fn merge_all_of(
        &self,
        branches: &[SchemaNode],
    ) -> (IndexMap<String, SchemaNode>, BTreeSet<String>) {
        let mut properties = IndexMap::new();
        let mut required_votes: IndexMap<String, Vec<bool>> = IndexMap::new();
        let mut visited = BTreeSet::new();

        for branch in branches {
            self.merge_branch(branch, &mut properties, &mut required_votes, &mut visited);
        }

        let required = required_votes
            .into_iter()
            .filter(|(_, votes)| votes.iter().all(|required| *required))
            .map(|(name, _)| name)
            .collect();

        (properties, required)
    }

    fn merge_branch(
        &self,
        branch: &SchemaNode,
        properties: &mut IndexMap<String, SchemaNode>,
        required_votes: &mut IndexMap<String, Vec<bool>>,
        visited: &mut BTreeSet<String>,
    ) {
        match branch {
            SchemaNode::Object {
                properties: branch_properties,
                required,
            } => {
                for (prop_name, prop) in branch_properties {
                    properties
                        .entry(prop_name.clone())
                        .or_insert_with(|| prop.clone());
                    required_votes
                        .entry(prop_name.clone())
                        .or_default()
                        .push(required.contains(prop_name));
                }
            }
            SchemaNode::Reference { target } => {
                if visited.insert(target.clone()) {
                    match self.schemas.get(target) {
                        Some(resolved) => {
                            self.merge_branch(resolved, properties, required_votes, visited)
                        }
                        None => warn!(
                            schema = %target,
                            "allOf branch references undeclared schema, skipping"
                        ),
                    }
                }
            }
            SchemaNode::AllOf { branches } => {
                for nested in branches {
                    self.merge_branch(nested, properties, required_votes, visited);
                }
            }
            _ => warn!("allOf branch is not an object, skipping"),
        }
    }

    /// Maps `oneOf`/`anyOf` branches to `xs:choice` members.
    ///
    /// Reference branches are named after their target, primitive branches
    /// after their scalar type, anything else becomes a `value` element with
    /// an inline body.
    fn map_choice_branches(
        &self,
        branches: &[SchemaNode],
        visiting: &mut Vec<String>,
    ) -> Vec<XsdElement> {
        branches
            .iter()
            .map(|branch| match branch {
                SchemaNode::Reference { target } => {
                    self.map_reference_property(target, target, visiting)
                }
                SchemaNode::Primitive { ty, format } => XsdElement::typed(
                    primitive_name(*ty),
                    primitive_type(*ty, format.as_deref()),
                ),
                other => XsdElement::inline("value", self.map_definition(None, other, visiting)),
            })
            .collect()
    }
}

/// Qualified reference to a named type in the target namespace.
fn tns(name: &str) -> String {
    format!("tns:{}", name)
}

/// Maps a scalar type (plus optional format) to the XSD builtin.
fn primitive_type(ty: PrimitiveType, format: Option<&str>) -> String {
    if let Some(format) = format {
        match format_type(ty, format) {
            Some(mapped) => return mapped.to_string(),
            None => warn!(format, "no XSD mapping for format, using the base type"),
        }
    }
    base_type(ty).to_string()
}

fn base_type(ty: PrimitiveType) -> &'static str {
    match ty {
        PrimitiveType::String => "xs:string",
        PrimitiveType::Integer => "xs:integer",
        PrimitiveType::Number => "xs:decimal",
        PrimitiveType::Boolean => "xs:boolean",
    }
}

fn primitive_name(ty: PrimitiveType) -> &'static str {
    match ty {
        PrimitiveType::String => "string",
        PrimitiveType::Integer => "integer",
        PrimitiveType::Number => "number",
        PrimitiveType::Boolean => "boolean",
    }
}

fn format_type(ty: PrimitiveType, format: &str) -> Option<&'static str> {
    match (ty, format) {
        (PrimitiveType::String, "date-time") => Some("xs:dateTime"),
        (PrimitiveType::String, "date") => Some("xs:date"),
        (PrimitiveType::String, "time") => Some("xs:time"),
        // SS12000 identifiers; no dedicated XSD builtin exists.
        (PrimitiveType::String, "uuid") => Some("xs:string"),
        (PrimitiveType::Integer, "int32") => Some("xs:int"),
        (PrimitiveType::Integer, "int64") => Some("xs:long"),
        (PrimitiveType::Number, "float") => Some("xs:float"),
        (PrimitiveType::Number, "double") => Some("xs:double"),
        _ => None,
    }
}
