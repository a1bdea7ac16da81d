//! Declarative destination←source column mapping.
//!
//! A [`MappingRules`] value maps each destination column name to an optional
//! source column name. [`apply_mapping`] projects an arbitrary table onto
//! that destination schema: unknown sources, out-of-range indexes, and null
//! sources all degrade to empty cells rather than errors, since uploaded
//! tables are legitimately ragged. Output rows are always rectangular.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Destination column name → source column name (or `None` for "no source").
///
/// Stored in a `BTreeMap` so the destination schema falls out in code-point
/// order without a separate sort, independent of rule insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MappingRules(pub BTreeMap<String, Option<String>>);

impl MappingRules {
    /// Loads rules from a JSON file, or YAML when the extension says so.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening rules file {path:?}"))?;
        let reader = BufReader::new(file);
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            serde_yaml::from_reader(reader).context("Parsing YAML mapping rules")
        } else {
            serde_json::from_reader(reader).context("Parsing JSON mapping rules")
        }
    }

    /// Destination column names in schema order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A table projected onto a destination schema. Every row has exactly
/// `normalized_headers.len()` cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MappedTable {
    pub normalized_headers: Vec<String>,
    pub normalized_rows: Vec<Vec<String>>,
}

/// Applies `rules` to a table, producing one output row per input row.
///
/// Source names resolve through `headers` by position; when the same name
/// appears twice the last occurrence wins. A destination whose source is
/// null, unknown, or beyond the end of a ragged row yields an empty cell.
pub fn apply_mapping(headers: &[String], rows: &[Vec<String>], rules: &MappingRules) -> MappedTable {
    let mut lookup: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, name) in headers.iter().enumerate() {
        lookup.insert(name.as_str(), idx);
    }

    let schema: Vec<String> = rules.0.keys().cloned().collect();
    let normalized_rows = rows
        .iter()
        .map(|row| {
            schema
                .iter()
                .map(|dest| resolve_cell(row, &lookup, rules.0[dest].as_deref()))
                .collect()
        })
        .collect();

    MappedTable {
        normalized_headers: schema,
        normalized_rows,
    }
}

fn resolve_cell(row: &[String], lookup: &BTreeMap<&str, usize>, source: Option<&str>) -> String {
    source
        .and_then(|name| lookup.get(name))
        .and_then(|&idx| row.get(idx))
        .cloned()
        .unwrap_or_default()
}
