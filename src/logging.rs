use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{TfResult, TypeForgeError};

pub const LOG_ENV: &str = "TYPEFORGE_LOG";

/// Pick the filter directive from the CLI flags
pub fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("typeforge={level}"),
        (true, None) => "typeforge=debug".to_string(),
        (false, None) => "typeforge=info".to_string(),
    }
}

/// Send structured logs to `path`. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr.
pub fn init_file_logging(path: &Path, verbose: bool, log_level: Option<&str>) -> TfResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| TypeForgeError::Logging(e.to_string()))?;

    tracing::debug!(path = %path.display(), "logging initialized");
    Ok(())
}
