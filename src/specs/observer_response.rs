// src/specs/observer_response.rs
//! The update form answers with a full page; the only part we care about is a
//! heading like
//!
//! ```text
//! <h3 style="color:green">Observer LCO added to OGLE-2017-BLG-1234</h3>
//! ```

use crate::core::html::contains_ci;

const HEADING: &str = "<h3 style";
const KEYWORD: &str = "Observer";

/// Text from `Observer` up to the next tag, taken from the last matching
/// heading on the page. `None` when the page has no such heading.
pub fn confirmation<I, S>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found = None;
    for line in lines {
        let line = line.as_ref();
        if !contains_ci(line, HEADING) {
            continue;
        }
        let Some(start) = line.find(KEYWORD) else { continue };
        let rest = &line[start..];
        let end = rest.find('<').unwrap_or(rest.len());
        found = Some(s!(rest[..end].trim_end()));
    }
    found
}
