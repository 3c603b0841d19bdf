// src/infra/logger.rs — Structured logging with tracing

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr. Used by the one-shot CLI commands.
pub fn init_logging(level: &str) {
    fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .compact()
        .init();
}

/// Log to a file so the terminal UI keeps the screen to itself.
///
/// Runs before the alternate screen is entered, so a file that can't be
/// opened is reported on stderr and logging is discarded.
pub fn init_file_logging(path: &Path, level: &str) {
    match open_log_file(path) {
        Ok(file) => fmt()
            .with_env_filter(env_filter(level))
            .with_target(false)
            .with_ansi(false)
            .compact()
            .with_writer(Mutex::new(file))
            .init(),
        Err(e) => {
            eprintln!(
                "warning: cannot write log file {}: {e}; logging disabled",
                path.display()
            );
            fmt()
                .with_env_filter(env_filter(level))
                .with_writer(std::io::sink)
                .init()
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}
