//! Builder pattern API for a generation run.
//!
//! ```rust,ignore
//! use evgen_core::prelude::*;
//!
//! let output = Generator::new()
//!     .input("/usr/include/linux/input.h")
//!     .input("/usr/include/linux/input-event-codes.h")
//!     .format(OutputFormat::Go)
//!     .run()?;
//!
//! print!("{}", output.text);
//! ```

use std::path::PathBuf;

use crate::aggregate::{aggregate_files, AggregateStats};
use crate::config::{EmitConfig, EvgenConfig, ExtractConfig};
use crate::emit::{GeneratedFile, TableEmitter};
use crate::error::EvgenResult;
use crate::render::{render, OutputFormat};

/// Builder for one generation run.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    inputs: Vec<PathBuf>,
    extract: ExtractConfig,
    emit: EmitConfig,
    format: OutputFormat,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Structured tables
    pub file: GeneratedFile,
    /// Rendered text in the requested format
    pub text: String,
    pub stats: AggregateStats,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded from a loaded configuration file.
    pub fn from_config(config: &EvgenConfig) -> EvgenResult<Self> {
        let format = match config.output_format() {
            Some(name) => name.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            inputs: Vec::new(),
            extract: config.extract_config(),
            emit: config.emit_config(),
            format,
        })
    }

    /// Append one input header. Inputs are read in the order added.
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.inputs.push(path.into());
        self
    }

    /// Append several input headers.
    pub fn inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn extract_config(mut self, config: ExtractConfig) -> Self {
        self.extract = config;
        self
    }

    pub fn emit_config(mut self, config: EmitConfig) -> Self {
        self.emit = config;
        self
    }

    /// Read every input and build the tables.
    ///
    /// All or nothing: an unreadable input fails the run before any table
    /// is built.
    pub fn generate(&self) -> EvgenResult<(GeneratedFile, AggregateStats)> {
        let (defs, stats) = aggregate_files(&self.inputs, &self.extract)?;
        let file = TableEmitter::new(&self.emit).emit(&defs);
        Ok((file, stats))
    }

    /// Generate and render.
    pub fn run(&self) -> EvgenResult<GenerationOutput> {
        let (file, stats) = self.generate()?;
        let text = render(&file, self.format)?;
        Ok(GenerationOutput { file, text, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use std::path::Path;

    #[test]
    fn test_builder_collects_inputs_in_order() {
        let gen = Generator::new().input("a.h").inputs(["b.h", "c.h"]);
        assert_eq!(
            gen.inputs,
            vec![PathBuf::from("a.h"), PathBuf::from("b.h"), PathBuf::from("c.h")]
        );
    }

    #[test]
    fn test_from_config_reads_format() {
        let cfg = parse_config(Path::new("evgen.toml"), "[output]\nformat = \"json\"").unwrap();
        let gen = Generator::from_config(&cfg).unwrap();
        assert_eq!(gen.format, OutputFormat::Json);
    }

    #[test]
    fn test_from_config_rejects_unknown_format() {
        let cfg = parse_config(Path::new("evgen.toml"), "[output]\nformat = \"xml\"").unwrap();
        assert!(Generator::from_config(&cfg).is_err());
    }

    #[test]
    fn test_no_inputs_renders_header_only() {
        let out = Generator::new().run().unwrap();
        assert!(out.file.categories.is_empty());
        assert!(out.text.starts_with("package evdev"));
        assert_eq!(out.stats.files, 0);
    }
}
