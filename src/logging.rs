use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Open `path` for appending log output, creating its directory if needed.
pub fn file_appender(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let Some(name) = path.file_name() else {
        anyhow::bail!("log path '{}' has no file name", path.display());
    };
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)?;
    Ok(appender)
}

/// Build the subscriber used by [`init`]. Output goes to `appender` when
/// given and to stderr otherwise.
pub fn subscriber(
    debug: bool,
    appender: Option<RollingFileAppender>,
) -> Box<dyn Subscriber + Send + Sync> {
    // When debug logging is disabled we force `info` level regardless of the
    // `RUST_LOG` environment variable.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match appender {
        Some(appender) => Box::new(builder.with_ansi(false).with_writer(appender).finish()),
        None => Box::new(builder.with_writer(std::io::stderr).finish()),
    }
}

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// via the settings file, in which case `RUST_LOG` may override it.
///
/// When `log_file` is given, output is appended to that file. A log file
/// that cannot be opened falls back to stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let (appender, failure) = match log_file.as_deref().map(file_appender) {
        Some(Ok(appender)) => (Some(appender), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let _ = tracing::subscriber::set_global_default(subscriber(debug, appender));

    if let Some(e) = failure {
        tracing::warn!("log file unavailable, logging to stderr: {e}");
    }
}
