//! Tracing setup for the command-line tool
//!
//! Console output goes to stderr so prompts and results on stdout stay clean.
//! When a log file is configured every event is also appended there, without
//! colors, through a background writer.

use crate::config::LoggingOptions;
use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Target a bare level applies to (library and binary share it); everything
/// else stays at `warn`.
const CRATE_TARGET: &str = "visionclaw_qr";

/// Keeps the log file writer alive; drop it last so pending lines are flushed.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber described by `options`.
///
/// A second call, or a subscriber already installed by the caller, is a no-op.
pub fn init(options: &LoggingOptions) -> Result<LogGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LogGuard { _file: None });
    }

    let directives = filter_directives(&options.level);
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {e}", options.level)))?;

    let (file_layer, guard) = match &options.file {
        Some(path) => {
            let (writer, guard) = NonBlockingBuilder::default()
                .lossy(false)
                .finish(open_log_file(path)?);
            let layer = fmt::layer()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(options.color)
        .with_writer(io::stderr);

    Registry::default()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(LogGuard { _file: guard })
}

/// Turn a configured level into `EnvFilter` directives.
///
/// A bare level such as `debug` only raises this tool's own targets, so image
/// and QR library internals stay quiet; anything containing `=` or `,` is
/// passed through untouched.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    format!("warn,{CRATE_TARGET}={level}")
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::Config(format!(
                "Failed to create log directory {}: {e}",
                dir.display()
            ))
        })?;
    }

    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::Config(format!("Failed to open log file {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_this_tool() {
        assert_eq!(filter_directives("debug"), "warn,visionclaw_qr=debug");
        assert!(EnvFilter::try_new(filter_directives(" info ")).is_ok());
    }

    #[test]
    fn full_directives_pass_through() {
        assert_eq!(filter_directives("rqrr=trace,info"), "rqrr=trace,info");
    }

    #[test]
    fn log_file_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("visionclaw-qr.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unopenable_log_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_log_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
