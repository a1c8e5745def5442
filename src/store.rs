// src/store.rs
//! Snapshot files: the optional output file and the history file.
//!
//! Both use the same plain-text layout:
//!
//! ```text
//! # <header>
//! # <units header>
//! OB171234 17:50:31.2 -29:43:12 1.52 7912.3 23.4 17.2 0.5 0.0 24.0 high medium 3 LCO:uFUN
//! ```
//!
//! Writes truncate. Reading skips `#` lines and blank lines; the `#` lines come
//! back as headers so a fallback run can print them again.

use std::{fs, io, path::{Path, PathBuf}};

use tracing::{debug, info, warn};

use crate::config::consts::{DEBUG_LOG_FILE, STORE_DIR};
use crate::error::SyncError;
use crate::file::write_truncate;
use crate::names::NameCodec;
use crate::target::{Catalogue, Target};

const COMMENT: char = '#';

#[derive(Debug, Default)]
pub struct Snapshot {
    pub headers: Vec<String>,
    pub catalogue: Catalogue,
    /// Lines that did not parse, as `MalformedRow` (1-based file line numbers).
    pub rejected: Vec<SyncError>,
}

pub fn debug_log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(DEBUG_LOG_FILE)
}

/// Header lines first, then one target per line in key order.
pub fn render_snapshot(headers: &[String], catalogue: &Catalogue) -> String {
    let mut out = s!();
    for h in headers {
        out.push(COMMENT);
        out.push(' ');
        out.push_str(h);
        out.push('\n');
    }
    for target in catalogue.values() {
        out.push_str(&target.to_line());
        out.push('\n');
    }
    out
}

pub fn write_snapshot(path: &Path, headers: &[String], catalogue: &Catalogue) -> Result<(), SyncError> {
    write_truncate(path, &render_snapshot(headers, catalogue)).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {} target(s) to {}", catalogue.len(), path.display());
    Ok(())
}

pub fn read_snapshot(path: &Path, codec: &NameCodec) -> Result<Snapshot, SyncError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("no snapshot at {}", path.display());
            return Err(SyncError::MissingFallbackFile(path.to_path_buf()));
        }
        Err(source) => return Err(SyncError::Io { path: path.to_path_buf(), source }),
    };
    Ok(parse_snapshot(&text, codec))
}

/// Parse snapshot text. Bad lines are collected, not fatal.
pub fn parse_snapshot(text: &str, codec: &NameCodec) -> Snapshot {
    let mut snap = Snapshot::default();

    for (ix, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(header) = trimmed.strip_prefix(COMMENT) {
            let header = header.trim();
            if !header.is_empty() {
                snap.headers.push(s!(header));
            }
            continue;
        }

        match Target::from_line(trimmed, codec) {
            Ok(Some(target)) => {
                snap.catalogue.insert(s!(target.short_name()), target);
            }
            Ok(None) => {}
            Err(source) => {
                debug!("snapshot line {} rejected: {source}", ix + 1);
                snap.rejected.push(SyncError::MalformedRow { line: ix + 1, source });
            }
        }
    }
    snap
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "\
# Name RA Dec A_0
#

OB171234 17:50:31.2 -29:43:12 1.52 7912.3 23.4 17.2 0.5 none 24.0 high medium 3 LCO:uFUN
MB180042 18:01:02.3 -27:11:40 3.1 8200.1 12.0 16.1 1.2 17.0 6.0 low low 1
not a target
";

    #[test]
    fn parse_skips_comments_and_blanks() {
        let snap = parse_snapshot(TEXT, &NameCodec::default());
        assert_eq!(snap.headers, vec!["Name RA Dec A_0"]);
        assert_eq!(snap.catalogue.keys().collect::<Vec<_>>(), vec!["MB180042", "OB171234"]);
        assert_eq!(snap.rejected.len(), 1);
        assert!(matches!(snap.rejected[0], SyncError::MalformedRow { line: 6, .. }));
    }

    #[test]
    fn render_puts_headers_first_in_key_order() {
        let snap = parse_snapshot(TEXT, &NameCodec::default());
        let text = render_snapshot(&snap.headers, &snap.catalogue);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "# Name RA Dec A_0");
        assert!(lines[1].starts_with("MB180042 "));
        assert!(lines[2].starts_with("OB171234 "));
        assert!(lines[2].contains(" 0.5 0.0 24.0 "));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let err = read_snapshot(&path, &NameCodec::default()).unwrap_err();
        assert!(matches!(err, SyncError::MissingFallbackFile(ref p) if *p == path));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn write_then_read_keeps_targets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store").join("history.txt");
        let codec = NameCodec::default();
        let snap = parse_snapshot(TEXT, &codec);

        write_snapshot(&path, &snap.headers, &snap.catalogue).unwrap();
        let back = read_snapshot(&path, &codec).unwrap();

        assert_eq!(back.headers, snap.headers);
        assert_eq!(back.catalogue, snap.catalogue);
        assert!(back.rejected.is_empty());
    }

    #[test]
    fn debug_log_lives_in_store() {
        assert_eq!(debug_log_path(), Path::new(".store").join("debug.log"));
    }
}
