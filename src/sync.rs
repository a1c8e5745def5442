// src/sync.rs
//! Fetch the target list, falling back to the last good snapshot.
//!
//! ```text
//! Fetching ─┬─ ok ──→ Success ──→ (persist) ──→ Delivered
//!           └─ err ─→ RemoteFailed ─┬─ no history ────────→ Empty
//!                                   └─ Fallback ─┬─ read ─→ Delivered
//!                                                └─ err ──→ Empty
//! ```
//!
//! Nothing here returns `Err`: every failure becomes a diagnostic line in the
//! report, in the order it happened.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::options::{PortalOptions, SyncOptions};
use crate::core::net::Transport;
use crate::error::SyncError;
use crate::names::NameCodec;
use crate::progress::Progress;
use crate::specs::target_list;
use crate::store;
use crate::target::Catalogue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Fetching,
    Success,
    RemoteFailed,
    Fallback,
    Delivered,
    Empty,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "FETCHING",
            Stage::Success => "SUCCESS",
            Stage::RemoteFailed => "REMOTE_FAILED",
            Stage::Fallback => "FALLBACK",
            Stage::Delivered => "DELIVERED",
            Stage::Empty => "EMPTY",
        };
        f.write_str(name)
    }
}

/// Where the catalogue in a report came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Online,
    History(PathBuf),
    Unavailable,
}

#[derive(Debug)]
pub struct SyncReport {
    pub headers: Vec<String>,
    pub catalogue: Catalogue,
    pub source: Source,
    pub diagnostics: Vec<String>,
}

impl SyncReport {
    fn empty(diagnostics: Vec<String>) -> Self {
        Self { headers: Vec::new(), catalogue: Catalogue::new(), source: Source::Unavailable, diagnostics }
    }
}

pub fn collect_targets(
    transport: &mut dyn Transport,
    portal: &PortalOptions,
    options: &SyncOptions,
    codec: &NameCodec,
    mut progress: Option<&mut dyn Progress>,
) -> SyncReport {
    let mut diagnostics: Vec<String> = Vec::new();

    enter(Stage::Fetching);
    if let Some(p) = progress.as_deref_mut() {
        p.log("Requesting target list…");
    }

    match fetch_page(transport, portal, &mut diagnostics) {
        Some(lines) => {
            enter(Stage::Success);
            let bundle = target_list::extract(&lines, codec);
            for rejected in &bundle.rejected {
                diag!(diagnostics, "{rejected}");
            }
            if bundle.targets.is_empty() {
                warn!("portal returned an empty target list");
            }
            diag!(diagnostics, "source: online");

            persist(options, &bundle.headers, &bundle.targets, &mut diagnostics);
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("{} target(s) from the portal", bundle.targets.len()));
            }

            enter(Stage::Delivered);
            SyncReport {
                headers: bundle.headers,
                catalogue: bundle.targets,
                source: Source::Online,
                diagnostics,
            }
        }
        None => {
            enter(Stage::RemoteFailed);
            let Some(path) = options.history.as_deref() else {
                enter(Stage::Empty);
                return SyncReport::empty(diagnostics);
            };

            enter(Stage::Fallback);
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Portal unavailable, reading {}", path.display()));
            }
            read_fallback(path, codec, diagnostics)
        }
    }
}

/// Authenticate, then ask for the list. `None` once either step fails.
fn fetch_page(
    transport: &mut dyn Transport,
    portal: &PortalOptions,
    diagnostics: &mut Vec<String>,
) -> Option<Vec<String>> {
    let credentials = &portal.credentials;

    if let Err(e) = transport.request(&portal.list_url, credentials, None) {
        diag!(diagnostics, "{}", SyncError::Authentication(e));
        return None;
    }
    diag!(diagnostics, "Logged into target portal as {}", credentials.user);

    match transport.request(&portal.list_url, credentials, Some(&[])) {
        Ok(lines) => {
            debug!("target list page: {} line(s)", lines.len());
            Some(lines)
        }
        Err(e) => {
            diag!(diagnostics, "{}", SyncError::RemoteRequest(e));
            None
        }
    }
}

fn persist(options: &SyncOptions, headers: &[String], catalogue: &Catalogue, diagnostics: &mut Vec<String>) {
    for path in [options.out.as_deref(), options.history.as_deref()].into_iter().flatten() {
        if let Err(e) = store::write_snapshot(path, headers, catalogue) {
            diag!(diagnostics, "{e}");
        }
    }
}

fn read_fallback(path: &Path, codec: &NameCodec, mut diagnostics: Vec<String>) -> SyncReport {
    match store::read_snapshot(path, codec) {
        Ok(snap) => {
            for rejected in &snap.rejected {
                diag!(diagnostics, "{rejected}");
            }
            diag!(diagnostics, "source: {}", path.display());
            enter(Stage::Delivered);
            SyncReport {
                headers: snap.headers,
                catalogue: snap.catalogue,
                source: Source::History(path.to_path_buf()),
                diagnostics,
            }
        }
        Err(e) => {
            diag!(diagnostics, "{e}");
            enter(Stage::Empty);
            SyncReport::empty(diagnostics)
        }
    }
}

fn enter(stage: Stage) {
    info!("sync → {stage}");
}
