use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use herald_common::config::AppConfig;

const DEFAULT_FILTER: &str = "herald_poller=debug,herald_notifier=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install stdout logging plus a JSON log file rotated daily.
///
/// Keep the returned guard alive for the whole process; dropping it flushes
/// the file writer.
pub fn init(config: &AppConfig) -> anyhow::Result<WorkerGuard> {
    let path = Path::new(&config.log_file);
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("LOG_FILE must name a file: {}", config.log_file))?;

    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(config.log_max_files.max(1))
        .build(directory)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .with(fmt::layer().json().with_writer(file_writer))
        .try_init()?;

    Ok(guard)
}

/// Stdout-only logging for failures that happen before the configuration
/// is known.
pub fn init_stdout() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init()
        .ok();
}
