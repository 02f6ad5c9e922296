//! Reverse lookup tables: numeric value -> symbolic name.
//!
//! Entries are replayed in aggregation order and reduced last-write-wins,
//! so when `BTN_MISC` and `BTN_0` share `0x100` the later one is kept. The
//! losing names are kept on the side for diagnostics only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::int_parse::parse_c_int;

/// One `value: "NAME"` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseEntry {
    pub value: i64,
    pub name: String,
}

/// A name displaced from the table by a later one with the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub value: i64,
    pub kept: String,
    pub shadowed: String,
}

/// value -> name table for one category, ascending by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseTable {
    /// Go identifier of the map variable, e.g. `EVName`
    pub var_name: String,
    /// Go key type, e.g. `EvType`
    pub key_type: String,
    pub entries: Vec<ReverseEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub shadowed: Vec<Collision>,
}

impl ReverseTable {
    /// Build the table from `(name, raw value)` pairs in aggregation order.
    ///
    /// A pair is skipped when its name is in `exclude` or the first
    /// whitespace-separated token of its value is not an integer literal.
    pub fn build<'a, I>(
        category: &str,
        var_name: String,
        key_type: String,
        entries: I,
        exclude: &[String],
    ) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut by_value: BTreeMap<i64, &str> = BTreeMap::new();
        let mut shadowed = Vec::new();

        for (name, raw_value) in entries {
            if exclude.iter().any(|e| e == name) {
                continue;
            }
            let Some(value) = raw_value.split_whitespace().next().and_then(parse_c_int) else {
                continue;
            };

            if let Some(previous) = by_value.insert(value, name) {
                shadowed.push(Collision {
                    value,
                    kept: format!("{}_{}", category, name),
                    shadowed: format!("{}_{}", category, previous),
                });
            }
        }

        let entries = by_value
            .into_iter()
            .map(|(value, name)| ReverseEntry {
                value,
                name: format!("{}_{}", category, name),
            })
            .collect();

        Self {
            var_name,
            key_type,
            entries,
            shadowed,
        }
    }

    /// Name registered for `value`.
    pub fn lookup(&self, value: i64) -> Option<&str> {
        self.entries
            .binary_search_by_key(&value, |e| e.value)
            .ok()
            .map(|i| self.entries[i].name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
