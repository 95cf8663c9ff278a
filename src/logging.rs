//! Tracing subscriber setup.
//!
//! The terminal belongs to the TUI, so diagnostics go to a log file.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber writing to `log_file_path`.
///
/// `RUST_LOG` overrides the `info` default. Returns false when the file
/// cannot be created or a subscriber is already set.
pub fn init_global(log_file_path: &Path) -> bool {
    if let Some(parent) = log_file_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };
    build_subscriber(log_file).try_init().is_ok()
}

/// File logging filtered by `RUST_LOG`, shared with tests.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
