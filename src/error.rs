// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::net::NetError;
use crate::target::RowError;

/// Everything that can go wrong in a sync or update run.
///
/// None of these escape the engine or the updater as `Err`: they are rendered
/// with `Display` into the run's diagnostic lines, which is what users read.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Problem logging into target portal: {0}")]
    Authentication(#[source] NetError),

    #[error("Problem requesting target list: {0}")]
    RemoteRequest(#[source] NetError),

    #[error("row parse error (line {line}): {source}")]
    MalformedRow { line: usize, source: RowError },

    #[error("Fallback history file not found: {}", .0.display())]
    MissingFallbackFile(PathBuf),

    #[error("ERROR: unexpected output encountered from online interface")]
    UnrecognizedObserverResponse,

    #[error("Unrecognised target name: {0}")]
    UnrecognizedTargetName(String),

    #[error("Problem updating observer list for {target}: {source}")]
    Submission { target: String, source: NetError },

    #[error("Could not access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("usage: {0}")]
    Usage(String),
}
