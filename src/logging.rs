// SPDX-License-Identifier: MIT
//
// File logging for the demo.
//
// The demo owns the terminal, so log lines go to a daily-rolling file in
// the configured directory and never to stdout or stderr. The returned
// guard must stay alive until exit; dropping it flushes the writer thread.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "clikit.log";
const DEFAULT_FILTER: &str = "clikit=info";

/// Install the global subscriber writing into `log_dir`.
///
/// `RUST_LOG` overrides the default `clikit=info` filter.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
