//! Aggregation of extracted definitions into a [`DefinitionSet`].
//!
//! Inputs are folded in the order they are supplied; a later definition of
//! the same `(category, name)` replaces the earlier one. Every assignment is
//! stamped with a sequence number so the reverse tables can replay
//! "last write wins" deterministically.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::error::{EvgenResult, IoResultExt};
use crate::extract::{DefineExtractor, Definition, ExtractStats};

/// One stored value plus the sequence number of its latest assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionEntry {
    pub raw_value: String,
    pub seq: u64,
}

/// category -> name -> raw value.
///
/// Both levels are sorted maps, so iteration order is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    categories: BTreeMap<String, BTreeMap<String, DefinitionEntry>>,
    next_seq: u64,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, replacing any earlier one with the same key.
    ///
    /// Returns the raw value it replaced.
    pub fn insert(&mut self, def: Definition) -> Option<String> {
        let seq = self.next_seq;
        self.next_seq += 1;

        let Definition {
            category,
            name,
            raw_value,
        } = def;

        let previous = self
            .categories
            .entry(category)
            .or_default()
            .insert(name, DefinitionEntry { raw_value, seq });

        previous.map(|p| p.raw_value)
    }

    /// Raw value for `(category, name)`.
    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|names| names.get(name))
            .map(|e| e.raw_value.as_str())
    }

    /// Categories in ascending order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// `(name, raw value)` pairs of one category, ascending by name.
    pub fn entries(&self, category: &str) -> Vec<(&str, &str)> {
        self.categories
            .get(category)
            .map(|names| {
                names
                    .iter()
                    .map(|(n, e)| (n.as_str(), e.raw_value.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `(name, raw value)` pairs of one category in the order they were
    /// last assigned.
    pub fn entries_in_insertion_order(&self, category: &str) -> Vec<(&str, &str)> {
        let Some(names) = self.categories.get(category) else {
            return Vec::new();
        };

        let mut entries: Vec<_> = names.iter().collect();
        entries.sort_by_key(|(_, e)| e.seq);
        entries
            .into_iter()
            .map(|(n, e)| (n.as_str(), e.raw_value.as_str()))
            .collect()
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Total number of definitions across categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Extend<Definition> for DefinitionSet {
    fn extend<I: IntoIterator<Item = Definition>>(&mut self, iter: I) {
        for def in iter {
            self.insert(def);
        }
    }
}

impl FromIterator<Definition> for DefinitionSet {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Totals over a whole aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub files: usize,
    pub extract: ExtractStats,
    pub overwritten: usize,
}

/// Read every path in order and fold its definitions into one set.
///
/// The first file that cannot be opened or read aborts the run; nothing
/// gathered from earlier files is returned.
pub fn aggregate_files<P: AsRef<Path>>(
    paths: &[P],
    config: &ExtractConfig,
) -> EvgenResult<(DefinitionSet, AggregateStats)> {
    let extractor = DefineExtractor::new(config)?;
    let mut set = DefinitionSet::new();
    let mut stats = AggregateStats::default();

    for path in paths {
        let path = path.as_ref();
        let (defs, file_stats) = {
            let file = File::open(path).with_path(path)?;
            extractor.extract_reader(path, BufReader::new(file))?
        };

        for def in defs {
            if let Some(previous) = set.get(&def.category, &def.name) {
                debug!(
                    category = %def.category,
                    name = %def.name,
                    previous = %previous,
                    value = %def.raw_value,
                    "definition overwritten"
                );
                stats.overwritten += 1;
            }
            set.insert(def);
        }

        stats.files += 1;
        stats.extract.lines += file_stats.lines;
        stats.extract.matched += file_stats.matched;
        stats.extract.blacklisted += file_stats.blacklisted;
        stats.extract.renamed += file_stats.renamed;
    }

    info!(
        files = stats.files,
        categories = set.category_count(),
        definitions = set.len(),
        overwritten = stats.overwritten,
        "aggregated definitions"
    );

    Ok((set, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(category: &str, name: &str, value: &str) -> Definition {
        Definition::new(category, name, value)
    }

    #[test]
    fn test_last_write_wins() {
        let mut set = DefinitionSet::new();
        assert_eq!(set.insert(def("KEY", "A", "30")), None);
        assert_eq!(set.insert(def("KEY", "A", "31")), Some("30".to_string()));
        assert_eq!(set.get("KEY", "A"), Some("31"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_name_different_category() {
        let set: DefinitionSet = vec![def("KEY", "MAX", "0x2ff"), def("EV", "MAX", "0x1f")]
            .into_iter()
            .collect();
        assert_eq!(set.get("KEY", "MAX"), Some("0x2ff"));
        assert_eq!(set.get("EV", "MAX"), Some("0x1f"));
        assert_eq!(set.category_count(), 2);
    }

    #[test]
    fn test_categories_sorted() {
        let set: DefinitionSet = vec![
            def("SYN", "REPORT", "0"),
            def("EV", "SYN", "0x00"),
            def("KEY", "ESC", "1"),
        ]
        .into_iter()
        .collect();
        let cats: Vec<_> = set.categories().collect();
        assert_eq!(cats, vec!["EV", "KEY", "SYN"]);
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let set: DefinitionSet = vec![def("KEY", "B", "48"), def("KEY", "A", "30"), def("KEY", "10", "68")]
            .into_iter()
            .collect();
        let names: Vec<_> = set.entries("KEY").into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["10", "A", "B"]);
    }

    #[test]
    fn test_insertion_order_follows_latest_assignment() {
        let set: DefinitionSet = vec![
            def("BTN", "MISC", "0x100"),
            def("BTN", "ZERO", "0x100"),
            def("BTN", "MISC", "0x100"),
        ]
        .into_iter()
        .collect();
        let names: Vec<_> = set
            .entries_in_insertion_order("BTN")
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["ZERO", "MISC"]);
    }

    #[test]
    fn test_missing_category() {
        let set = DefinitionSet::new();
        assert!(set.is_empty());
        assert!(set.entries("EV").is_empty());
        assert!(set.entries_in_insertion_order("EV").is_empty());
        assert_eq!(set.get("EV", "KEY"), None);
    }
}
