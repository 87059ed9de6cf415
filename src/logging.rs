//! Tracing setup for the board service.
//!
//! Targets worth knowing when tuning `RUST_LOG`:
//!
//! - `msgboard::board::service`: thread and reply writes (`Thread created`,
//!   `Reply added`, `Reply deleted`), each carrying a `thread_id` field and,
//!   for reply events, a `reply_id`. Rejected deletes and reports log at
//!   debug with the `outcome`.
//! - `msgboard::board::repository`: version conflicts retried by `modify`
//!   (debug).
//! - `msgboard::db`: database open/close and schema migrations.
//! - `msgboard::web`: listener lifecycle, 409 conflicts and 500s.
//! - `tower_http::trace`: one span per HTTP request.
//!
//! Per-query `sqlx` statements are held at `warn` unless `RUST_LOG` asks
//! for them.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Targets capped below the configured level.
const QUIET_TARGETS: &[(&str, &str)] = &[("sqlx::query", "warn"), ("hyper", "info")];

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter directives used when `RUST_LOG` is unset.
///
/// The configured level applies everywhere except the quiet targets, which
/// never log more than their cap.
fn default_directives(level: &str) -> String {
    let level = parse_level(level);
    let mut directives = vec![level.as_str().to_lowercase()];
    for (target, cap) in QUIET_TARGETS {
        let cap = parse_level(cap);
        // Higher tracing levels are more verbose.
        let effective = if level > cap { cap } else { level };
        directives.push(format!("{}={}", target, effective.as_str().to_lowercase()));
    }
    directives.join(",")
}

/// `RUST_LOG` replaces the defaults entirely when set.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Initialize logging to stdout and the configured log file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level);

    if let Some(parent) = Path::new(&config.file).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = Arc::new(File::create(&config.file)?);
    let writer = std::io::stdout.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Console-only logging for local runs.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(build_filter(level))
        .init();
}
