//! Category reclassification.
//!
//! `linux/input.h` spells device properties as `INPUT_PROP_POINTER`,
//! `INPUT_PROP_DIRECT`, ... The generated package wants them in their own
//! `PROP` category. The name is cut with a character-set left trim, not a
//! prefix strip, so `PROP_POINTER` becomes `INTER`. Existing generated
//! identifiers depend on that, so it stays.

use crate::config::RenameConfig;

/// Strip every leading character of `s` that appears in `set`.
pub fn trim_left_chars<'a>(s: &'a str, set: &str) -> &'a str {
    s.trim_start_matches(|c: char| set.contains(c))
}

/// Apply the rename rule to a `(category, name)` pair.
///
/// Returns `None` when the rule does not apply.
pub fn apply_rename(rule: &RenameConfig, category: &str, name: &str) -> Option<(String, String)> {
    if category != rule.from_category || !name.starts_with(rule.name_prefix.as_str()) {
        return None;
    }

    Some((
        rule.to_category.clone(),
        trim_left_chars(name, &rule.trim_chars).to_string(),
    ))
}
