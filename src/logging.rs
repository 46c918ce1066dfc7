//! Logging utilities for climplot.
//!
//! Structured `tracing` helpers shared by the engines and the CLI.

use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::colormaps::Diagnostic;
use crate::error::ClimplotError;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();

    debug!(operation = operation, "Starting operation");

    let result = f();

    info!(
        operation = operation,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log a non-fatal diagnostic raised while building a color mapping
pub fn log_diagnostic(diagnostic: &Diagnostic, palette: &str) {
    warn!(
        palette = palette,
        diagnostic = %diagnostic,
        "Colormap diagnostic"
    );
}

/// Log an error with context
pub fn log_error(error: &ClimplotError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}
