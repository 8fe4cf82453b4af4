//! File-based log setup.
//!
//! Logs go to `$ATLAS_HOME/logs/` rather than stderr so they never
//! corrupt the TUI's alternate screen. `ATLAS_LOG` overrides the
//! configured level.

use anyhow::{Context, Result};
use atlas_core::config::{self, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initializes the global subscriber. The returned guard must be kept
/// alive for the duration of the process so buffered logs get flushed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let logs_dir = config::paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create logs directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "atlas.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = tracing_subscriber::EnvFilter::try_from_env("ATLAS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
