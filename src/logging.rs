use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::error::{AppError, Result};

pub const LOG_ENV: &str = "ADPOST_LOG";
pub const DEFAULT_LOG_FILE: &str = "adpost.log";

/// Installs the global subscriber. The terminal belongs to the UI, so events
/// go to a file through a non-blocking writer; keep the guard alive until exit.
pub fn init(log_file: Option<&Path>, level: &str) -> Result<WorkerGuard> {
    let path = log_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::Logging(format!("{} is not a file path", path.display())))?;

    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::default()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(filter(level)?)
        .with(file_layer)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    Ok(guard)
}

/// `ADPOST_LOG` wins over the configured level.
pub fn filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|err| AppError::Logging(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::filter;

    #[test]
    fn configured_level_parses() {
        assert!(filter("debug").is_ok());
        assert!(filter("adpost=trace,warn").is_ok());
    }

    #[test]
    fn garbage_level_is_reported() {
        if std::env::var_os(super::LOG_ENV).is_some() {
            return;
        }
        assert!(filter("adpost=loud").is_err());
    }
}
