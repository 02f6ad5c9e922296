//! evgen-core: evdev constant table generation from Linux input headers.
//!
//! Scans `#define` lines in headers such as `linux/input-event-codes.h`,
//! groups them by prefix category (`EV`, `KEY`, `ABS`, ...) and produces, per
//! category, a sorted constant block plus a value -> name reverse table,
//! rendered as Go source for the `evdev` package.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use evgen_core::prelude::*;
//!
//! let output = Generator::new()
//!     .inputs(["input.h", "input-event-codes.h"])
//!     .run()?;
//! print!("{}", output.text);
//! ```
//!
//! # Module Organization
//!
//! - [`extract`]: `#define` line matching, blacklists, `INPUT_PROP_*` rename
//! - [`aggregate`]: ordered, last-write-wins [`DefinitionSet`]
//! - [`emit`]: constant blocks and reverse tables
//! - [`render`]: Go and JSON output
//! - [`builder`]: fluent [`Generator`] wiring the pipeline over files
//! - [`config`]: defaults and `evgen.toml` overrides
//! - [`error`]: typed error handling
//! - [`logging`]: tracing setup

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod logging;
pub mod prelude;
pub mod render;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{EvgenError, EvgenResult, IoResultExt};

// Builder API
pub use builder::{GenerationOutput, Generator};

// Configuration
pub use config::{
    load_config, parse_config, EmitConfig, EvgenConfig, ExtractConfig, KeyTypeConfig,
    OutputConfig, RenameConfig,
};

// Extraction
pub use extract::{
    apply_rename, extract_definitions, trim_left_chars, DefineExtractor, Definition,
    ExtractStats, DEFINE_PATTERN,
};

// Aggregation
pub use aggregate::{aggregate_files, AggregateStats, DefinitionEntry, DefinitionSet};

// Emission
pub use emit::{
    parse_c_int, CategoryTables, Collision, Constant, ConstantBlock, GeneratedFile,
    ReverseEntry, ReverseTable, TableEmitter,
};

// Rendering
pub use render::{render, render_go, render_json, OutputFormat, GENERATED_BANNER};

// Logging
pub use logging::{init_structured_logging, log_event, log_warn};
