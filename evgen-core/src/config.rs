//! Configuration: built-in defaults plus an optional `evgen.toml` override.
//!
//! With no file every value falls back to the constants the evdev package
//! has always been generated with, so a bare `evgen input.h ...` run keeps
//! producing byte-identical output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::Path};

use crate::error::{EvgenError, EvgenResult, IoResultExt};

/// Go package name written at the top of the generated file.
pub const DEFAULT_PACKAGE: &str = "evdev";

/// ioctl macro families that look like constants but are not.
pub const DEFAULT_TYPE_BLACKLIST: &[&str] = &["EVIOCGKEYCODE", "EVIOCSKEYCODE"];

/// Names that are byte counts, lookup flags or versions rather than codes.
pub const DEFAULT_NAME_BLACKLIST: &[&str] = &["KEYMAP_BY_INDEX", "PROP_CNT", "VERSION"];

/// Names left out of every reverse table.
pub const DEFAULT_EXCLUDE_NAMES: &[&str] = &["MAX"];

/// Main configuration structure for evgen.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvgenConfig {
    /// Go package name.
    pub package: Option<String>,
    /// Categories dropped entirely.
    pub type_blacklist: Option<Vec<String>>,
    /// Names dropped in every category.
    pub name_blacklist: Option<Vec<String>>,
    /// Names that never enter a reverse table.
    pub exclude_names: Option<Vec<String>>,
    /// Category reclassification rule.
    pub rename: Option<RenameConfig>,
    /// Reverse table key types.
    pub key_types: Option<KeyTypeConfig>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Reclassification of one category's prefixed names into another category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameConfig {
    pub from_category: String,
    pub name_prefix: String,
    pub to_category: String,
    /// Every leading character in this set is stripped from the name.
    pub trim_chars: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            from_category: "INPUT".to_string(),
            name_prefix: "PROP_".to_string(),
            to_category: "PROP".to_string(),
            trim_chars: "PROP_".to_string(),
        }
    }
}

/// Key type selection for reverse tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyTypeConfig {
    /// Type used for categories without an override.
    pub default: Option<String>,
    /// Category -> type.
    pub overrides: Option<BTreeMap<String, String>>,
}

/// Output format configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output format: "go" or "json".
    pub format: Option<String>,
}

/// Settings consumed by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub type_blacklist: Vec<String>,
    pub name_blacklist: Vec<String>,
    pub rename: RenameConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            type_blacklist: to_owned_vec(DEFAULT_TYPE_BLACKLIST),
            name_blacklist: to_owned_vec(DEFAULT_NAME_BLACKLIST),
            rename: RenameConfig::default(),
        }
    }
}

/// Settings consumed by the table emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    pub package: String,
    pub exclude_names: Vec<String>,
    pub default_key_type: String,
    pub key_types: BTreeMap<String, String>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        let key_types = [("EV", "EvType"), ("PROP", "EvProp")]
            .iter()
            .map(|(c, t)| (c.to_string(), t.to_string()))
            .collect();

        Self {
            package: DEFAULT_PACKAGE.to_string(),
            exclude_names: to_owned_vec(DEFAULT_EXCLUDE_NAMES),
            default_key_type: "EvCode".to_string(),
            key_types,
        }
    }
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl EvgenConfig {
    /// Resolve extractor settings, falling back to defaults.
    pub fn extract_config(&self) -> ExtractConfig {
        let defaults = ExtractConfig::default();
        ExtractConfig {
            type_blacklist: self.type_blacklist.clone().unwrap_or(defaults.type_blacklist),
            name_blacklist: self.name_blacklist.clone().unwrap_or(defaults.name_blacklist),
            rename: self.rename.clone().unwrap_or(defaults.rename),
        }
    }

    /// Resolve emitter settings, falling back to defaults.
    ///
    /// Key type overrides are merged over the built-in ones.
    pub fn emit_config(&self) -> EmitConfig {
        let mut cfg = EmitConfig::default();

        if let Some(package) = &self.package {
            cfg.package = package.clone();
        }
        if let Some(exclude) = &self.exclude_names {
            cfg.exclude_names = exclude.clone();
        }
        if let Some(key_types) = &self.key_types {
            if let Some(default) = &key_types.default {
                cfg.default_key_type = default.clone();
            }
            if let Some(overrides) = &key_types.overrides {
                cfg.key_types
                    .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        cfg
    }

    /// Output format name from the file, if any.
    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }
}

/// Loads configuration from a TOML file.
pub fn load_config(path: &Path) -> EvgenResult<EvgenConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    parse_config(path, &content)
}

/// Parses configuration text; `path` is only used for error context.
pub fn parse_config(path: &Path, content: &str) -> EvgenResult<EvgenConfig> {
    toml::from_str(content).map_err(|e| EvgenError::config(path, e.to_string()))
}
