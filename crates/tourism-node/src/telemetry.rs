//! Telemetry and logging initialization.
//!
//! Sets up structured logging with tracing and optional JSON output.

use crate::config::LoggingConfig;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// The file writer flushes on drop, so its guard lives as long as the process.
static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);

/// Install the global subscriber.
///
/// Console output is pretty or JSON per `config.format`. When `log_file` is
/// set, JSON lines are also appended to that file.
pub fn init_telemetry(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.level)?;
    let json = config.format == "json";

    let file_layer = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            if let Ok(mut g) = LOG_GUARD.lock() {
                *g = Some(guard);
            }
            Some(fmt::layer().json().with_ansi(false).with_writer(non_blocking))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer().pretty()))
        .with(file_layer)
        .try_init()?;

    Ok(())
}
