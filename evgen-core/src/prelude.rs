//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use evgen_core::prelude::*;
//! ```

pub use crate::error::{EvgenError, EvgenResult};

pub use crate::config::{load_config, EmitConfig, EvgenConfig, ExtractConfig};

pub use crate::extract::{DefineExtractor, Definition};

pub use crate::aggregate::{aggregate_files, DefinitionSet};

pub use crate::emit::{GeneratedFile, TableEmitter};

pub use crate::render::{render, OutputFormat};

pub use crate::builder::{GenerationOutput, Generator};
