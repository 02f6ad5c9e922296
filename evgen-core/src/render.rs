//! Output formatting: Go source and JSON.
//!
//! The Go layout is fixed by the consumers of the generated `evdev`
//! package; change it only together with them.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

use crate::emit::{CategoryTables, GeneratedFile};
use crate::error::{EvgenError, EvgenResult};

/// Banner printed under the package clause.
pub const GENERATED_BANNER: &str = "THIS FILE IS AUTO-GENERATED. DO NOT MODIFY MANUALLY";

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Go,
    Json,
}

impl FromStr for OutputFormat {
    type Err = EvgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" => Ok(Self::Go),
            "json" => Ok(Self::Json),
            other => Err(EvgenError::render(format!("unknown output format: {}", other))),
        }
    }
}

/// Render in the requested format.
pub fn render(file: &GeneratedFile, format: OutputFormat) -> EvgenResult<String> {
    match format {
        OutputFormat::Go => render_go(file),
        OutputFormat::Json => render_json(file),
    }
}

/// Render the file as Go source.
pub fn render_go(file: &GeneratedFile) -> EvgenResult<String> {
    // ~40 bytes per line is plenty for these tables
    let lines: usize = file
        .categories
        .iter()
        .map(|c| c.constants.len() + c.reverse.len() + 5)
        .sum();
    let mut out = String::with_capacity(lines * 40 + 128);

    write_go(&mut out, file).map_err(|e| EvgenError::render(e.to_string()))?;
    Ok(out)
}

fn write_go(out: &mut String, file: &GeneratedFile) -> std::fmt::Result {
    writeln!(out, "package {}", file.package)?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "//")?;
    writeln!(out, "// {}", GENERATED_BANNER)?;
    writeln!(out, "//")?;
    writeln!(out)?;

    for tables in &file.categories {
        write_category(out, tables)?;
    }

    Ok(())
}

fn write_category(out: &mut String, tables: &CategoryTables) -> std::fmt::Result {
    writeln!(out, "// {}", tables.category)?;
    writeln!(out, "const (")?;
    for c in &tables.constants.constants {
        writeln!(out, "\t{} = {}", c.name, c.value)?;
    }
    writeln!(out, ")")?;

    let reverse = &tables.reverse;
    writeln!(
        out,
        "var {} = map[{}]string {{",
        reverse.var_name, reverse.key_type
    )?;
    for e in &reverse.entries {
        writeln!(out, "\t{}: \"{}\",", e.value, e.name)?;
    }
    writeln!(out, "}}")
}

/// Render the file as pretty-printed JSON.
pub fn render_json(file: &GeneratedFile) -> EvgenResult<String> {
    serde_json::to_string_pretty(file).map_err(|e| EvgenError::render(e.to_string()))
}
