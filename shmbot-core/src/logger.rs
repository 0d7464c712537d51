//! Tracing setup: one fmt layer teed to stdout and an append-mode log file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

const DEFAULT_FILTER: &str = "info";

/// Creates the directory holding `log_file_path` when it has one.
fn ensure_parent_dir(log_file_path: &Path) -> anyhow::Result<()> {
    match log_file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display())),
        _ => Ok(()),
    }
}

/// Installs the global tracing subscriber.
///
/// The level comes from `RUST_LOG` (e.g. `info`, `crocodile=debug`) and defaults to `info`.
/// Load `.env` before calling this, otherwise `RUST_LOG` from it is ignored.
pub fn init_tracing(log_file_path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = log_file_path.as_ref();
    ensure_parent_dir(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout.and(Arc::new(file)))
        .with_target(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
