#![deny(missing_docs)]

//! # Filter Resolution
//!
//! Computes which schema names get a standalone XSD definition and which are
//! inlined, from the include/exclude/expand options plus the usage
//! classification. Option I/O happens before this step: the three name sets
//! arrive here as immutable sets, so traversal stays free of I/O.

use crate::oas::models::SchemaNode;
use crate::oas::schemas::collect_references;
use crate::oas::usage::UsageMap;
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;
use tracing::warn;

/// Type selection options, resolved from the CLI before any traversal.
#[derive(Debug, Default, Clone)]
pub struct FilterConfig {
    /// If non-empty, only these names (plus transitive references) are
    /// emitted. Overrides `exclude` and `exclude_request_body_types`.
    pub include: BTreeSet<String>,
    /// Names to drop from the output.
    pub exclude: BTreeSet<String>,
    /// Names to inline at every reference site instead of defining them
    /// standalone.
    pub expand: BTreeSet<String>,
    /// Drop types reachable only from request bodies.
    pub exclude_request_body_types: bool,
}

/// Resolution result: what is defined standalone and what is inlined.
#[derive(Debug, Default, Clone)]
pub struct TypeSelection {
    /// Names that get a named top-level definition, in declaration order.
    pub standalone: IndexSet<String>,
    /// Names inlined at every reference site.
    pub expand: BTreeSet<String>,
}

impl TypeSelection {
    /// True if references to `name` must inline its body.
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expand.contains(name)
    }
}

/// Computes the final type selection.
///
/// A non-empty include set wins over everything else; otherwise the declared
/// names minus the exclude set minus (optionally) request-body-only types
/// remain. Expand targets are then demoted from standalone status. Unknown
/// names in any option are reported as warnings, never errors.
pub fn resolve_selection(
    config: &FilterConfig,
    schemas: &IndexMap<String, SchemaNode>,
    usage: &UsageMap,
) -> TypeSelection {
    warn_unknown_names(&config.include, schemas, "include");
    warn_unknown_names(&config.exclude, schemas, "exclude");
    warn_unknown_names(&config.expand, schemas, "expand");

    let eligible: BTreeSet<String> = if config.include.is_empty() {
        schemas
            .keys()
            .filter(|name| !config.exclude.contains(*name))
            .filter(|name| {
                !(config.exclude_request_body_types && usage.is_request_body_only(name))
            })
            .cloned()
            .collect()
    } else {
        include_closure(&config.include, schemas)
    };

    // Declaration order, with expand targets demoted to inline-only.
    let standalone = schemas
        .keys()
        .filter(|name| eligible.contains(*name) && !config.expand.contains(*name))
        .cloned()
        .collect();

    let expand = config
        .expand
        .iter()
        .filter(|name| schemas.contains_key(*name))
        .cloned()
        .collect();

    TypeSelection { standalone, expand }
}

/// Include entries plus every declared name they transitively reference.
///
/// Emitting the closure keeps references inside the selected set from
/// dangling; undeclared names were already reported by the caller.
fn include_closure(
    include: &BTreeSet<String>,
    schemas: &IndexMap<String, SchemaNode>,
) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    let mut pending: Vec<String> = include
        .iter()
        .filter(|name| schemas.contains_key(*name))
        .cloned()
        .collect();

    while let Some(name) = pending.pop() {
        if !visited.insert(name.clone()) {
            continue;
        }
        if let Some(node) = schemas.get(&name) {
            let mut referenced = BTreeSet::new();
            collect_references(node, &mut referenced);
            pending.extend(
                referenced
                    .into_iter()
                    .filter(|target| schemas.contains_key(target)),
            );
        }
    }

    visited
}

fn warn_unknown_names(
    names: &BTreeSet<String>,
    schemas: &IndexMap<String, SchemaNode>,
    option: &str,
) {
    for name in names {
        if !schemas.contains_key(name) {
            warn!(
                name = %name,
                option,
                "name is not declared in the document, ignoring"
            );
        }
    }
}
