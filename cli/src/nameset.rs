#![deny(missing_docs)]

//! # Name Set Resolution
//!
//! The include/exclude/expand options accept either a comma-separated list
//! or a path to a newline-delimited file. Both normalize to an immutable set
//! of names before any traversal begins, keeping the core free of option
//! I/O.

use oas2xsd_core::AppResult;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Resolves one option value into a set of schema names.
///
/// A value naming an existing file is read as newline-delimited entries;
/// anything else is split on commas. Entries are trimmed and blank entries
/// dropped.
pub fn resolve_name_set(value: Option<&str>) -> AppResult<BTreeSet<String>> {
    let Some(value) = value else {
        return Ok(BTreeSet::new());
    };

    let entries: Vec<String> = if Path::new(value).is_file() {
        fs::read_to_string(value)?
            .lines()
            .map(str::to_string)
            .collect()
    } else {
        value.split(',').map(str::to_string).collect()
    };

    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_none_is_empty() {
        assert!(resolve_name_set(None).unwrap().is_empty());
    }

    #[test]
    fn test_literal_list() {
        let set = resolve_name_set(Some("Person, Address ,,Duty")).unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["Address", "Duty", "Person"]
        );
    }

    #[test]
    fn test_file_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exclude.txt");
        fs::write(&path, "Person\n\n  Address  \n").unwrap();

        let set = resolve_name_set(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["Address", "Person"]
        );
    }

    #[test]
    fn test_single_name() {
        let set = resolve_name_set(Some("Person")).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains("Person"));
    }
}
