// src/specs/target_list.rs
//! Scraping *spec* for the target list page.
//!
//! Purpose:
//! - Read the portal's target list page, line by line, and turn the table
//!   between the `START TARGET LIST` / `END TARGET LIST` markers into [`Target`]s.
//! - Everything outside the markers is page layout (the page is built from
//!   nested tables) and is ignored.
//!
//! Line rules inside the markers:
//! - `<th…>` lines are pieces of the column titles. The title row is split over
//!   several physical lines, so the pieces are concatenated into one header.
//! - A line mentioning "recommended" is the units row under the titles; it is
//!   kept as a second header line.
//! - Any other `<td…>` line is a target row, unless it carries an image or a
//!   form (buttons, thumbnails).
//!
//! A row that doesn't fit the schema is skipped and reported; the rest of the
//! table still comes through.
//!
//! Non-Responsibilities:
//! - **No networking, no persistence.** See `sync` for when the page is fetched
//!   and where the result goes.

use tracing::{debug, warn};

use crate::config::consts::{EMPTY_CELL, END_MARKER, START_MARKER};
use crate::core::html::{self, contains_ci, has_tag, replace_tag};
use crate::core::sanitize::{flatten_entities, normalize_ws};
use crate::error::SyncError;
use crate::names::NameCodec;
use crate::target::{Catalogue, Target};

#[derive(Debug, Default)]
pub struct TargetListBundle {
    /// Column titles first, then the units row if the page had one.
    pub headers: Vec<String>,
    pub targets: Catalogue,
    /// One `MalformedRow` per skipped row, in page order.
    pub rejected: Vec<SyncError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scan {
    Outside,
    Inside,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineKind {
    Header,
    SecondaryHeader,
    Content,
    Furniture,
}

pub fn extract<I, S>(lines: I, codec: &NameCodec) -> TargetListBundle
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut title = s!();
    let mut units: Vec<String> = Vec::new();
    let mut bundle = TargetListBundle::default();
    let mut state = Scan::Outside;

    for (ix, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();

        match state {
            Scan::Outside => {
                if contains_ci(line, START_MARKER) {
                    debug!("target list starts at line {}", ix + 1);
                    state = Scan::Inside;
                    if contains_ci(line, END_MARKER) {
                        debug!("target list ends at line {}", ix + 1);
                        state = Scan::Outside;
                    }
                }
                continue;
            }
            Scan::Inside => {
                if contains_ci(line, END_MARKER) {
                    debug!("target list ends at line {}", ix + 1);
                    state = Scan::Outside;
                    continue;
                }
            }
        }

        match classify(line) {
            LineKind::Header => title.push_str(&clean_header(line)),
            LineKind::SecondaryHeader => units.push(clean_content(line)),
            LineKind::Content => {
                let entry = clean_content(line);
                match Target::from_row(&entry, codec, last_cell_blank(line)) {
                    Ok(Some(target)) => {
                        bundle.targets.insert(s!(target.short_name()), target);
                    }
                    Ok(None) => {}
                    Err(source) => {
                        warn!("skipping row at line {}: {source}", ix + 1);
                        bundle.rejected.push(SyncError::MalformedRow { line: ix + 1, source });
                    }
                }
            }
            LineKind::Furniture => {}
        }
    }

    let title = normalize_ws(&title);
    if !title.is_empty() {
        bundle.headers.push(title);
    }
    bundle.headers.extend(
        units
            .into_iter()
            .map(|u| s!(u.trim_end()))
            .filter(|u| !u.trim().is_empty()),
    );
    bundle
}

fn classify(line: &str) -> LineKind {
    if has_tag(line, "th") {
        LineKind::Header
    } else if contains_ci(line, "recommended") {
        LineKind::SecondaryHeader
    } else if has_tag(line, "td") && !is_furniture(line) {
        LineKind::Content
    } else {
        LineKind::Furniture
    }
}

fn is_furniture(line: &str) -> bool {
    contains_ci(line, "img src")
        || has_tag(line, "img")
        || has_tag(line, "form")
        || has_tag(line, "input")
}

/// Whether the row's final `<td>` holds nothing once markup is gone.
fn last_cell_blank(line: &str) -> bool {
    const CELL: char = '\u{1f}';
    let marked = replace_tag(line, "td", &CELL.to_string(), "");
    match marked.rsplit_once(CELL) {
        Some((_, last)) => flatten_entities(&html::drop_tags(last)).trim().is_empty(),
        None => false,
    }
}

/// `<th colspan="3">A<sub>0</sub></th>` → `A_0 `
fn clean_header(line: &str) -> String {
    let entry = line.trim_end_matches(['\r', '\n']);
    let entry = replace_tag(entry, "th", " ", " ");
    let entry = replace_tag(&entry, "sub", "_", "");
    let entry = html::drop_tags(&entry);

    let entry = entry.trim_start();
    let entry = entry.strip_prefix('+').unwrap_or(entry);
    s!(entry.trim_start())
}

/// Flatten one table row to space-separated cell text.
fn clean_content(line: &str) -> String {
    let entry = line.trim_end_matches(['\r', '\n']);
    let entry = replace_tag(entry, "tr", "", "");
    let entry = html::replace_ci(&entry, "<td></td>", EMPTY_CELL);
    let entry = replace_tag(&entry, "td", " ", " ");
    let entry = replace_tag(&entry, "b", "", "");
    // Target names link to their detail page; keep the link text only
    let entry = replace_tag(&entry, "a", "", " ");
    let entry = replace_tag(&entry, "br", ":", ":");
    let entry = html::drop_tags(&entry);
    flatten_entities(&entry)
}
