//! Logging setup.
//!
//! The terminal belongs to the renderer while the screen is up, so log
//! output goes to a file instead of stdout.

use std::env;
use std::fs::File;
use std::io;
use std::panic;
use std::path::Path;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "sequence-screen.log";

/// Base filter. `RUST_LOG` directives are appended, so they win.
const DEFAULT_FILTER: &str = "info";

/// Filter from the base level plus whatever `RUST_LOG` adds.
pub fn filter_directives(env_value: Option<&str>) -> String {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Some(extra) = env_value.filter(|v| !v.trim().is_empty()) {
        filter.push(',');
        filter.push_str(extra);
    }
    filter
}

/// Install a global `tracing` subscriber writing to `path`.
///
/// Panics are routed through the logger too, so a crash with the terminal
/// in raw mode still leaves a trace in the file.
pub fn init(path: impl AsRef<Path>) -> io::Result<()> {
    let log_file = File::create(path)?;
    let file_layer = fmt::layer()
        .compact()
        .with_ansi(false)
        .with_line_number(true)
        .with_writer(Arc::new(log_file));

    let env_value = env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = Registry::default()
        .with(EnvFilter::new(filter_directives(env_value.as_deref())))
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

    panic::set_hook(Box::new(|info| {
        error!("{}", info);
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_without_env() {
        assert_eq!(filter_directives(None), "info");
        assert_eq!(filter_directives(Some("  ")), "info");
    }

    #[test]
    fn test_env_directives_are_appended() {
        assert_eq!(
            filter_directives(Some("sequence_screen=debug")),
            "info,sequence_screen=debug"
        );
    }
}
