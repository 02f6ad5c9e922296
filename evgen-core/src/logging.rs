//! Structured logging using **tracing**.
//!
//! Generated source goes to stdout, so every diagnostic is routed to stderr
//! as JSON. Filtering follows `RUST_LOG` (e.g. `RUST_LOG=evgen_core=debug`
//! to see every skipped or renamed definition).

use tracing::{error, info, warn};

/// Initializes the global tracing subscriber.
///
/// Call once at startup. Later calls are ignored instead of panicking so
/// tests and embedders can call it freely.
pub fn init_structured_logging() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs a custom event, picking the level from the event name.
pub fn log_event(event: &str, detail: &str) {
    match event.to_uppercase().as_str() {
        "ERROR" => error!(event = %event, detail = %detail),
        "WARN" | "WARNING" => warn!(event = %event, detail = %detail),
        _ => info!(event = %event, detail = %detail),
    }
}
