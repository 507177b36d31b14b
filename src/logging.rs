//! File-backed tracing setup. The terminal belongs to the TUI, so logs only
//! go somewhere when a log file is requested.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to `path`.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::other(format!("logging setup failed: {e}")))
}
