// src/names.rs
//! Event names come in two spellings:
//!
//! - long, as the surveys publish them: `OGLE-2017-BLG-1234`
//! - short, as the target list keys them: `OB171234`
//!
//! The short form is `<survey letter>B<YY><event number>`. It is the join key
//! between our catalogue and the portal, so the survey table below is the one
//! place both directions read from.

use crate::config::consts::EVENT_NUMBER_LEN;

const SURVEYS: [(&str, char); 3] = [("OGLE", 'O'), ("MOA", 'M'), ("KMT", 'K')];

/// Short/long name converter. Dates are assumed to be 20xx.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameCodec {
    event_len: usize,
}

impl Default for NameCodec {
    fn default() -> Self {
        Self { event_len: EVENT_NUMBER_LEN }
    }
}

impl NameCodec {
    /// `event_len` is how many trailing characters of a short name are the event number.
    pub fn new(event_len: usize) -> Self {
        Self { event_len: event_len.max(1) }
    }

    /// `OGLE-2017-BLG-1234` → `OB171234`.
    ///
    /// The survey may appear anywhere in the name; the year is taken from the
    /// second hyphen-separated segment and the event number is the last one.
    pub fn to_short(&self, long: &str) -> Option<String> {
        let code = SURVEYS
            .iter()
            .find(|(survey, _)| long.contains(survey))
            .map(|(_, code)| *code)?;

        let year = long.split('-').nth(1)?.get(2..4)?;
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let event = long.rsplit('-').next().filter(|e| !e.is_empty())?;
        Some(format!("{code}B{year}{event}"))
    }

    /// `MB180042` → `MOA-2018-BLG-0042`.
    pub fn to_long(&self, short: &str) -> Option<String> {
        let code = short.chars().next()?;
        let survey = SURVEYS
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(survey, _)| *survey)?;

        if short.len() < 4 + self.event_len {
            return None;
        }
        let year = short.get(2..4)?;
        let event = short.get(short.len() - self.event_len..)?;
        Some(format!("{survey}-20{year}-BLG-{event}"))
    }

    /// Convert whichever form is given. Exactly one must be supplied.
    pub fn swap(&self, long: Option<&str>, short: Option<&str>) -> Option<String> {
        match (long, short) {
            (Some(long), None) => self.to_short(long),
            (None, Some(short)) => self.to_long(short),
            _ => None,
        }
    }

    /// The long form of `name`, converting only when it looks short.
    pub fn canonical_long(&self, name: &str) -> Option<String> {
        if is_short_form(name) {
            self.to_long(name)
        } else {
            Some(s!(name))
        }
    }
}

/// Short names are compact and never hyphenated.
pub fn is_short_form(name: &str) -> bool {
    name.len() < 10 && !name.contains('-')
}
