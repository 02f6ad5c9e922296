//! evgen CLI - generates the evdev Go constant tables from Linux input headers.
//!
//! ```text
//! evgen /usr/include/linux/input.h /usr/include/linux/input-event-codes.h > codes.go
//! ```
//!
//! Inputs are read in the order given. Nothing is written to stdout unless
//! every input was read successfully.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use evgen_core::{
    init_structured_logging, load_config, log_event, log_warn, EvgenConfig, Generator,
    OutputFormat,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate evdev constant tables from C headers")]
pub struct Cli {
    /// Header files to scan, in order
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output format: go or json
    #[arg(long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// TOML file overriding package name, blacklists and rename rule
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Resolve the generator from CLI flags and the optional config file.
fn build_generator(cli: &Cli) -> Result<Generator> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EvgenConfig::default(),
    };

    let mut generator = Generator::from_config(&config)?.inputs(cli.inputs.iter().cloned());
    if let Some(format) = cli.format {
        generator = generator.format(format);
    }

    Ok(generator)
}

fn run(cli: &Cli) -> Result<()> {
    let generator = build_generator(cli)?;

    // Fails before anything reaches stdout if any input is unreadable.
    let output = generator.run()?;

    let collisions = output.file.collisions().count();
    if collisions > 0 {
        log_warn(&format!(
            "{} reverse table entries shadowed by later definitions",
            collisions
        ));
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(output.text.as_bytes())
        .context("Failed to write generated output")?;
    handle.flush().context("Failed to flush generated output")?;

    log_event(
        "INFO",
        &format!(
            "generated {} categories from {} files",
            output.file.categories.len(),
            output.stats.files
        ),
    );

    Ok(())
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] evgen internal error: {}", info);
    }));

    init_structured_logging();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_positional_inputs_in_order() {
        let cli = Cli::try_parse_from(["evgen", "b.h", "a.h"]).unwrap();
        assert_eq!(cli.inputs, vec![PathBuf::from("b.h"), PathBuf::from("a.h")]);
        assert!(cli.format.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_inputs_required() {
        assert!(Cli::try_parse_from(["evgen"]).is_err());
    }

    #[test]
    fn test_parse_format() {
        let cli = Cli::try_parse_from(["evgen", "--format", "json", "a.h"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(Cli::try_parse_from(["evgen", "--format", "yaml", "a.h"]).is_err());
    }

    #[test]
    fn test_format_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let cfg = dir.path().join("evgen.toml");
        fs::write(&cfg, "[output]\nformat = \"json\"\n").unwrap();
        let header = dir.path().join("codes.h");
        fs::write(&header, "#define EV_KEY 0x01\n").unwrap();

        let cli = Cli::try_parse_from([
            "evgen".into(),
            "--config".into(),
            cfg.into_os_string(),
            "--format".into(),
            "go".into(),
            header.into_os_string(),
        ])
        .unwrap();

        let output = build_generator(&cli).unwrap().run().unwrap();
        assert!(output.text.starts_with("package evdev\n"));
    }

    #[test]
    fn test_bad_config_is_error() {
        let dir = TempDir::new().unwrap();
        let cfg = dir.path().join("evgen.toml");
        fs::write(&cfg, "not = [valid").unwrap();

        let cli = Cli {
            inputs: vec![PathBuf::from("a.h")],
            format: None,
            config: Some(cfg),
        };
        let err = build_generator(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }

    #[test]
    fn test_unreadable_input_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.h");
        let cli = Cli {
            inputs: vec![missing.clone()],
            format: None,
            config: None,
        };
        let err = run(&cli).unwrap_err();
        let cause = fs::File::open(&missing).unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            format!("Cannot read {}: {}", missing.display(), cause)
        );
    }
}
