// src/log.rs
//! File logging for the binary. The library only emits `tracing` events; this
//! is where they end up: `.store/debug.log`, appended, one line per event,
//! stamped with time since start.

use std::error::Error;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::file::ensure_directory;

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// `[HH:MM:SS.mmm]` since the subscriber was installed.
struct Elapsed(Instant);

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", fmt_elapsed(self.0.elapsed().as_millis()))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// If the log file can't be opened the events go to stderr instead, so a
/// read-only working directory never stops a run.
pub fn init(log_file: &Path, verbose: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let writer = match open_append(log_file) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!("Warning: cannot open {} ({e}); logging to stderr", log_file.display());
            BoxMakeWriter::new(std::io::stderr)
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Elapsed(Instant::now()))
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
}

fn open_append(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
