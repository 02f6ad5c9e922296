//! Line-level `#define` extraction.
//!
//! Recognizes single-line numeric definitions such as
//!
//! ```text
//! #define EV_KEY			0x01
//! #define KEY_MAX			0x2ff
//! #define ABS_MT_SLOT		0x2f	/* MT slot being modified */
//! #define INPUT_PROP_POINTER	0x00	/* needs a pointer */
//! ```
//!
//! Anything else (function-like macros, includes, comments, values built
//! from other macros with characters outside the value class) is skipped
//! without complaint. Headers are read as bytes: a stray Latin-1 byte in a
//! comment is decoded lossily and never fails the file.

use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, trace};

use super::rename::apply_rename;
use crate::config::ExtractConfig;
use crate::error::{EvgenError, EvgenResult, IoResultExt};

/// Definition line pattern: category, name, raw value.
pub const DEFINE_PATTERN: &str = r"^#define[ \t]([A-Z]+)_([A-Z0-9_]+)[ \t]+([0-9a-fA-Zx()_+ ]+)";

/// One recognized definition after filtering and renaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Uppercase prefix family, e.g. `EV`, `KEY`, `PROP`
    pub category: String,
    /// Remainder after the first underscore
    pub name: String,
    /// Value text exactly as matched
    pub raw_value: String,
}

impl Definition {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            raw_value: raw_value.into(),
        }
    }

    /// `<category>_<name>`, the identifier used in generated code.
    pub fn qualified_name(&self) -> String {
        format!("{}_{}", self.category, self.name)
    }
}

/// Per-source extraction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines: usize,
    pub matched: usize,
    pub blacklisted: usize,
    pub renamed: usize,
}

impl ExtractStats {
    /// Definitions actually emitted.
    pub fn emitted(&self) -> usize {
        self.matched - self.blacklisted
    }
}

/// Why a matched line did or did not produce a definition.
enum LineOutcome {
    Skipped,
    Blacklisted,
    Kept { def: Definition, renamed: bool },
}

/// Compiled extractor. Build once, reuse for every input.
#[derive(Debug, Clone)]
pub struct DefineExtractor {
    pattern: Regex,
    config: ExtractConfig,
}

impl DefineExtractor {
    /// Compile the definition pattern for the given rules.
    pub fn new(config: &ExtractConfig) -> EvgenResult<Self> {
        let pattern = Regex::new(DEFINE_PATTERN).map_err(|e| EvgenError::pattern(e.to_string()))?;
        Ok(Self {
            pattern,
            config: config.clone(),
        })
    }

    fn classify(&self, line: &str) -> LineOutcome {
        // A line counts only when the pattern matches exactly once.
        let mut matches = self.pattern.captures_iter(line);
        let caps = match (matches.next(), matches.next()) {
            (Some(caps), None) => caps,
            _ => return LineOutcome::Skipped,
        };

        let category = &caps[1];
        let name = &caps[2];
        let raw_value = &caps[3];

        if self.config.type_blacklist.iter().any(|t| t == category) {
            trace!(category, name, "blacklisted category");
            return LineOutcome::Blacklisted;
        }
        if self.config.name_blacklist.iter().any(|n| n == name) {
            trace!(category, name, "blacklisted name");
            return LineOutcome::Blacklisted;
        }

        match apply_rename(&self.config.rename, category, name) {
            Some((new_category, new_name)) => {
                trace!(category, name, %new_category, %new_name, "reclassified");
                LineOutcome::Kept {
                    def: Definition::new(new_category, new_name, raw_value),
                    renamed: true,
                }
            }
            None => LineOutcome::Kept {
                def: Definition::new(category, name, raw_value),
                renamed: false,
            },
        }
    }

    /// Extract a definition from one line, if it is a recognized one.
    pub fn extract_line(&self, line: &str) -> Option<Definition> {
        match self.classify(line) {
            LineOutcome::Kept { def, .. } => Some(def),
            _ => None,
        }
    }

    /// Extract from an in-memory string, counting what was seen.
    pub fn extract_str(&self, content: &str) -> (Vec<Definition>, ExtractStats) {
        let mut defs = Vec::new();
        let mut stats = ExtractStats::default();
        for line in content.lines() {
            self.record(line, &mut defs, &mut stats);
        }
        (defs, stats)
    }

    /// Scan a reader line by line.
    ///
    /// A read failure mid-scan fails the whole source; whatever was
    /// extracted before it is discarded.
    pub fn extract_reader<R: BufRead>(
        &self,
        path: &Path,
        mut reader: R,
    ) -> EvgenResult<(Vec<Definition>, ExtractStats)> {
        let mut defs = Vec::new();
        let mut stats = ExtractStats::default();
        let mut buf = Vec::with_capacity(256);

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).with_path(path)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(strip_line_ending(&buf));
            self.record(&line, &mut defs, &mut stats);
        }

        debug!(
            file = %path.display(),
            lines = stats.lines,
            matched = stats.matched,
            blacklisted = stats.blacklisted,
            renamed = stats.renamed,
            "extracted definitions"
        );

        Ok((defs, stats))
    }

    fn record(&self, line: &str, defs: &mut Vec<Definition>, stats: &mut ExtractStats) {
        stats.lines += 1;
        match self.classify(line) {
            LineOutcome::Skipped => {}
            LineOutcome::Blacklisted => {
                stats.matched += 1;
                stats.blacklisted += 1;
            }
            LineOutcome::Kept { def, renamed } => {
                stats.matched += 1;
                if renamed {
                    stats.renamed += 1;
                }
                defs.push(def);
            }
        }
    }
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Extract all definitions from header text with the default rules.
pub fn extract_definitions(content: &str) -> EvgenResult<Vec<Definition>> {
    let extractor = DefineExtractor::new(&ExtractConfig::default())?;
    Ok(extractor.extract_str(content).0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};
    use std::path::PathBuf;

    fn extractor() -> DefineExtractor {
        DefineExtractor::new(&ExtractConfig::default()).unwrap()
    }

    #[test]
    fn test_simple_define() {
        let def = extractor().extract_line("#define EV_KEY\t\t\t0x01").unwrap();
        assert_eq!(def, Definition::new("EV", "KEY", "0x01"));
        assert_eq!(def.qualified_name(), "EV_KEY");
    }

    #[test]
    fn test_multi_underscore_name() {
        let def = extractor().extract_line("#define ABS_MT_SLOT\t\t0x2f\t/* MT slot */").unwrap();
        assert_eq!(def.category, "ABS");
        assert_eq!(def.name, "MT_SLOT");
        assert_eq!(def.raw_value, "0x2f");
    }

    #[test]
    fn test_value_keeps_trailing_space() {
        let def = extractor().extract_line("#define KEY_A 30 /* a */").unwrap();
        assert_eq!(def.raw_value, "30 ");
    }

    #[test]
    fn test_expression_value_verbatim() {
        let def = extractor()
            .extract_line("#define KEY_CNT\t\t\t(KEY_MAX+1)")
            .unwrap();
        assert_eq!(def.raw_value, "(KEY_MAX+1)");
    }

    #[test]
    fn test_non_matching_lines() {
        let ex = extractor();
        assert!(ex.extract_line("").is_none());
        assert!(ex.extract_line("/* #define EV_KEY 0x01 */").is_none());
        assert!(ex.extract_line(" #define EV_KEY 0x01").is_none());
        assert!(ex.extract_line("#define ev_key 0x01").is_none());
        assert!(ex.extract_line("#define EVKEY 0x01").is_none());
        assert!(ex.extract_line("#define EV_KEY").is_none());
        assert!(ex.extract_line("#include <linux/types.h>").is_none());
        assert!(ex.extract_line("#define EVIOCGID\t\t_IOR('E', 0x02, struct input_id)").is_none());
    }

    #[test]
    fn test_type_blacklist() {
        let ex = extractor();
        assert!(ex.extract_line("#define EVIOCGKEYCODE_V2 _IOR(0x04)").is_none());
        assert!(ex.extract_line("#define EVIOCSKEYCODE_V2 _IOW(0x04)").is_none());
    }

    #[test]
    fn test_name_blacklist() {
        let ex = extractor();
        assert!(ex.extract_line("#define EV_VERSION\t\t0x010001").is_none());
        assert!(ex.extract_line("#define INPUT_KEYMAP_BY_INDEX\t(1 << 0)").is_none());
        assert!(ex.extract_line("#define INPUT_PROP_CNT\t\t\t(INPUT_PROP_MAX + 1)").is_none());
    }

    #[test]
    fn test_input_prop_is_reclassified() {
        let def = extractor()
            .extract_line("#define INPUT_PROP_POINTER\t\t0x00\t/* needs a pointer */")
            .unwrap();
        assert_eq!(def.category, "PROP");
        assert_eq!(def.name, "INTER");
        assert_eq!(def.raw_value, "0x00");
    }

    #[test]
    fn test_input_prop_max_keeps_max() {
        let def = extractor().extract_line("#define INPUT_PROP_MAX\t\t\t0x1f").unwrap();
        assert_eq!(def, Definition::new("PROP", "MAX", "0x1f"));
    }

    #[test]
    fn test_extract_str_stats() {
        let content = "\
#ifndef _INPUT_H
#define EV_SYN\t\t\t0x00
#define EV_VERSION\t\t0x010001
#define INPUT_PROP_DIRECT\t\t0x01
int x;
";
        let (defs, stats) = extractor().extract_str(content);
        assert_eq!(defs.len(), 2);
        assert_eq!(
            stats,
            ExtractStats {
                lines: 5,
                matched: 3,
                blacklisted: 1,
                renamed: 1
            }
        );
        assert_eq!(stats.emitted(), 2);
    }

    #[test]
    fn test_extract_definitions_preserves_order() {
        let content = "#define KEY_B 48\n#define KEY_A 30\n";
        let defs = extract_definitions(content).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
            }
            self.served = true;
            let line = b"#define EV_KEY 0x01\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_read_error_mid_scan_fails_source() {
        let reader = io::BufReader::new(FailingReader { served: false });
        let err = extractor()
            .extract_reader(&PathBuf::from("broken.h"), reader)
            .unwrap_err();
        assert!(matches!(err, EvgenError::Io { .. }));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "device gone");
    }

    #[test]
    fn test_non_utf8_bytes_are_not_fatal() {
        let content: &[u8] = b"/* Copyright \xa9 1999 */\n#define EV_KEY 0x01\r\n#define EV_SYN\t0x00";
        let (defs, stats) = extractor()
            .extract_reader(&PathBuf::from("latin1.h"), content)
            .unwrap();
        assert_eq!(
            defs,
            vec![
                Definition::new("EV", "KEY", "0x01"),
                Definition::new("EV", "SYN", "0x00"),
            ]
        );
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending(b"abc\r\n"), b"abc");
        assert_eq!(strip_line_ending(b"abc\n"), b"abc");
        assert_eq!(strip_line_ending(b"abc"), b"abc");
        assert_eq!(strip_line_ending(b"\r\n"), b"");
    }
}
