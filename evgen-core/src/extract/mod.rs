//! `#define` extraction from C header text.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │ define_extractor.rs │     │     rename.rs       │
//! │  ─────────────────  │     │  ─────────────────  │
//! │  Match the line     │────▶│  INPUT_PROP_* into  │
//! │  pattern, blacklist │     │  the PROP category  │
//! └──────────┬──────────┘     └─────────────────────┘
//!            ▼
//!      Definition { category, name, raw_value }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use evgen_core::extract::{DefineExtractor, ExtractConfig};
//!
//! let extractor = DefineExtractor::new(&ExtractConfig::default())?;
//! let def = extractor.extract_line("#define EV_KEY\t\t\t0x01").unwrap();
//! assert_eq!(def.qualified_name(), "EV_KEY");
//! ```

pub mod define_extractor;
pub mod rename;

pub use crate::config::ExtractConfig;
pub use define_extractor::{
    extract_definitions, DefineExtractor, Definition, ExtractStats, DEFINE_PATTERN,
};
pub use rename::{apply_rename, trim_left_chars};
