//! Tracing configuration for PromptShelf
//!
//! ## Architecture / 架构
//!
//! - **stdout layer**: always on, log-style format
//! - **file layer**: daily-rolling file under `<data_dir>/logs` when a logs
//!   directory is given; falls back to stdout only if it cannot be created
//! - **Environment-aware**: `RUST_LOG` overrides the built-in directives

use std::path::Path;
use std::{fs, io, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for app crates
/// - **Production**: info level for app crates
/// - **Quiet** (client commands): warn everywhere
/// - HTTP and pool plumbing never goes below info
fn build_filter_directives(is_dev: bool, quiet: bool) -> Vec<String> {
    let level = match (quiet, is_dev) {
        (true, _) => "warn",
        (false, true) => "debug",
        (false, false) => "info",
    };
    let plumbing = if quiet { "warn" } else { "info" };
    vec![
        level.to_string(),
        format!("hyper={plumbing}"),
        format!("warp={plumbing}"),
        format!("reqwest={plumbing}"),
        format!("r2d2={plumbing}"),
    ]
}

/// Initialize the tracing subscriber
///
/// ## Behavior / 行为
///
/// 1. Creates an env-filter for level control (RUST_LOG wins)
/// 2. Sets up a stdout fmt layer with log-compatible formatting
/// 3. Adds a non-blocking daily file layer when `logs_dir` is given
/// 4. Registers the global subscriber
///
/// Call once, at the start of `main`.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(logs_dir: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development(), quiet);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = logs_dir.and_then(|dir| match build_file_writer(dir) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    });

    // "2026-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "promptshelf.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
