//! Logging initialization
//!
//! tracing-subscriber setup with an env-filter (RUST_LOG wins over the
//! configured level), a console layer and an optional non-blocking file
//! layer. The appender guard is parked in a static so the writer stays
//! alive for the process lifetime.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub use crate::infrastructure::config::LoggingConfig;

static LOG_GUARDS: Lazy<Mutex<Vec<WorkerGuard>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Initialize logging with the default configuration.
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize logging from configuration. Safe to call once per process;
/// a second call is ignored.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let console_layer = config
        .console
        .then(|| fmt::layer().with_target(true).with_ansi(true));

    let file_layer = match &config.file_dir {
        Some(dir) => {
            let appender = rolling::never(PathBuf::from(dir), &config.file_name);
            let (writer, guard) = non_blocking(appender);
            LOG_GUARDS
                .lock()
                .expect("log guard lock poisoned")
                .push(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    let init = Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    match init {
        Ok(()) => {
            info!(level = %config.level, file = config.file_dir.is_some(), "logging initialized");
            Ok(())
        }
        // Another subscriber already owns the process; keep it.
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_ok());
    }

    #[test]
    fn file_layer_config_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            console: false,
            file_dir: Some(dir.path().display().to_string()),
            ..LoggingConfig::default()
        };
        // May be a no-op if another test already installed a subscriber,
        // but must never error.
        assert!(init_logging_with_config(&config).is_ok());
    }
}
