//! Sorted constant blocks.

use serde::{Deserialize, Serialize};

/// One `<category>_<name> = <raw value>` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub value: String,
}

/// All constants of one category, ascending by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantBlock {
    pub category: String,
    pub constants: Vec<Constant>,
}

impl ConstantBlock {
    /// Build a block from `(name, raw value)` pairs in any order.
    ///
    /// Names are sorted by byte order; values pass through untouched, so
    /// expressions like `(KEY_MAX+1)` stay unevaluated.
    pub fn build<'a, I>(category: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.dedup_by(|a, b| a.0 == b.0);

        let constants = entries
            .into_iter()
            .map(|(name, value)| Constant {
                name: format!("{}_{}", category, name),
                value: value.to_string(),
            })
            .collect();

        Self {
            category: category.to_string(),
            constants,
        }
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}
