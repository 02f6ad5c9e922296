//! Table emission: constant blocks and reverse lookup tables per category.
//!
//! # Architecture
//!
//! ```text
//!            ┌─────────────────────┐
//!            │    DefinitionSet    │
//!            └──────────┬──────────┘
//!                       │ one category at a time
//!           ┌───────────┴───────────┐
//!           ▼                       ▼
//! ┌─────────────────────┐ ┌─────────────────────┐
//! │ constant_block.rs   │ │  reverse_table.rs   │
//! │  ─────────────────  │ │  ─────────────────  │
//! │  sorted by name,    │ │  value -> name,     │
//! │  values verbatim    │ │  last write wins    │
//! └──────────┬──────────┘ └──────────┬──────────┘
//!            └───────────┬───────────┘
//!                        ▼
//!                  GeneratedFile
//! ```
//!
//! The emitter computes data only. Turning a [`GeneratedFile`] into text is
//! the job of [`crate::render`].

pub mod constant_block;
pub mod int_parse;
pub mod reverse_table;

pub use constant_block::{Constant, ConstantBlock};
pub use int_parse::parse_c_int;
pub use reverse_table::{Collision, ReverseEntry, ReverseTable};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::DefinitionSet;
use crate::config::EmitConfig;

/// Suffix appended to the capitalized category for the table variable.
pub const TABLE_NAME_SUFFIX: &str = "Name";

/// Everything generated for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTables {
    pub category: String,
    pub constants: ConstantBlock,
    pub reverse: ReverseTable,
}

/// The whole generated file, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub package: String,
    pub categories: Vec<CategoryTables>,
}

impl GeneratedFile {
    /// Tables for one category.
    pub fn category(&self, category: &str) -> Option<&CategoryTables> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Every value collision across all reverse tables.
    pub fn collisions(&self) -> impl Iterator<Item = &Collision> {
        self.categories.iter().flat_map(|c| c.reverse.shadowed.iter())
    }
}

/// Builds [`GeneratedFile`]s from aggregated definitions.
#[derive(Debug, Clone, Default)]
pub struct TableEmitter {
    config: EmitConfig,
}

impl TableEmitter {
    pub fn new(config: &EmitConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Reverse table variable name: first letter upper-cased, rest kept.
    ///
    /// `EV` stays `EV`, so the table is `EVName`.
    pub fn reverse_table_name(category: &str) -> String {
        let mut chars = category.chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}{}",
                first.to_uppercase(),
                chars.as_str(),
                TABLE_NAME_SUFFIX
            ),
            None => TABLE_NAME_SUFFIX.to_string(),
        }
    }

    /// Go key type for a category's reverse table.
    pub fn key_type_for(&self, category: &str) -> &str {
        self.config
            .key_types
            .get(category)
            .map(String::as_str)
            .unwrap_or(self.config.default_key_type.as_str())
    }

    /// Tables for a single category of `defs`.
    pub fn category_tables(&self, defs: &DefinitionSet, category: &str) -> CategoryTables {
        let constants = ConstantBlock::build(category, defs.entries(category));
        let reverse = ReverseTable::build(
            category,
            Self::reverse_table_name(category),
            self.key_type_for(category).to_string(),
            defs.entries_in_insertion_order(category),
            &self.config.exclude_names,
        );

        for c in &reverse.shadowed {
            warn!(
                value = c.value,
                kept = %c.kept,
                shadowed = %c.shadowed,
                "reverse table value collision"
            );
        }

        debug!(
            category,
            constants = constants.len(),
            reverse_entries = reverse.len(),
            "emitted category"
        );

        CategoryTables {
            category: category.to_string(),
            constants,
            reverse,
        }
    }

    /// Tables for every category, in ascending category order.
    pub fn emit(&self, defs: &DefinitionSet) -> GeneratedFile {
        let categories = defs
            .categories()
            .map(|category| self.category_tables(defs, category))
            .collect();

        GeneratedFile {
            package: self.config.package.clone(),
            categories,
        }
    }
}
