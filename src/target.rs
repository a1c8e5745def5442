// src/target.rs
//! One row of the target list.
//!
//! The row format is positional: whitespace-separated tokens in the order of
//! [`Field::SCHEMA`]. The same table drives parsing (portal page, history
//! file) and writing (output and history files), so the two cannot disagree
//! on column order.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::names::NameCodec;

/// Targets keyed by short name. Ordered so written files are stable.
pub type Catalogue = BTreeMap<String, Target>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Parsed as `f64`; any token containing "none" reads as `0.0`.
    Float,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    ShortName,
    Ra,
    Dec,
    A0Survey,
    T0Survey,
    TeSurvey,
    MagLast,
    DeltaTLast,
    MagModel,
    CadenceHrs,
    SpitzerPriority,
    GroundPriority,
    SurveyCadence,
    ObserversList,
}

impl Field {
    pub const SCHEMA: [(Field, &'static str, FieldKind); 14] = [
        (Field::ShortName, "short_name", FieldKind::Text),
        (Field::Ra, "ra", FieldKind::Text),
        (Field::Dec, "dec", FieldKind::Text),
        (Field::A0Survey, "A0_survey", FieldKind::Float),
        (Field::T0Survey, "t0_survey", FieldKind::Text),
        (Field::TeSurvey, "tE_survey", FieldKind::Float),
        (Field::MagLast, "mag_last", FieldKind::Float),
        (Field::DeltaTLast, "delta_t_last", FieldKind::Float),
        (Field::MagModel, "mag_model", FieldKind::Float),
        (Field::CadenceHrs, "cadence_hrs", FieldKind::Float),
        (Field::SpitzerPriority, "spitzer_priority", FieldKind::Text),
        (Field::GroundPriority, "ground_priority", FieldKind::Text),
        (Field::SurveyCadence, "survey_cadence", FieldKind::Text),
        (Field::ObserversList, "observers_list", FieldKind::Text),
    ];

    pub fn name(self) -> &'static str {
        Self::SCHEMA[self as usize].1
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("{field} is not a number: {token:?}")]
    BadNumber { field: &'static str, token: String },
    #[error("unrecognised target name {0:?}")]
    UnknownName(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Float(f64),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            // Debug keeps the ".0" on whole numbers and round-trips exactly
            FieldValue::Float(v) => write!(f, "{v:?}"),
        }
    }
}

enum Slot<'a> {
    Text(&'a mut String),
    Float(&'a mut f64),
}

/// A catalogue entry. Built only by parsing a row; read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Target {
    short_name: String,
    long_name: String,
    ra: String,
    dec: String,
    a0_survey: f64,
    t0_survey: String,
    te_survey: f64,
    mag_last: f64,
    delta_t_last: f64,
    mag_model: f64,
    cadence_hrs: f64,
    spitzer_priority: String,
    ground_priority: String,
    survey_cadence: String,
    observers_list: String,
}

impl Target {
    /// Parse one snapshot line. `Ok(None)` for a blank line.
    ///
    /// All fields are required except the trailing observers list, which is
    /// written as nothing when empty.
    pub fn from_line(line: &str, codec: &NameCodec) -> Result<Option<Self>, RowError> {
        Self::from_row(line, codec, true)
    }

    /// Parse one flattened table row.
    ///
    /// An empty cell leaves no token behind, so a row one token short is only
    /// complete when `observers_blank` says the empty cell was the last one.
    pub fn from_row(line: &str, codec: &NameCodec, observers_blank: bool) -> Result<Option<Self>, RowError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(None);
        }

        let expected = Field::SCHEMA.len();
        let short_ok = observers_blank && tokens.len() == expected - 1;
        if tokens.len() != expected && !short_ok {
            return Err(RowError::FieldCount { expected, found: tokens.len() });
        }

        let mut target = Target::default();
        for ((field, name, _), token) in Field::SCHEMA.iter().zip(tokens) {
            match target.slot_mut(*field) {
                Slot::Text(dst) => *dst = s!(token),
                Slot::Float(dst) => *dst = parse_number(*name, token)?,
            }
        }

        target.long_name = codec
            .to_long(&target.short_name)
            .ok_or_else(|| RowError::UnknownName(target.short_name.clone()))?;
        Ok(Some(target))
    }

    /// The row again, space separated, in schema order.
    pub fn to_line(&self) -> String {
        let cells: Vec<String> = Field::SCHEMA
            .iter()
            .map(|(field, _, _)| self.value(*field).to_string())
            .collect();
        cells.join(" ").trim_end().to_string()
    }

    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::ShortName => FieldValue::Text(&self.short_name),
            Field::Ra => FieldValue::Text(&self.ra),
            Field::Dec => FieldValue::Text(&self.dec),
            Field::A0Survey => FieldValue::Float(self.a0_survey),
            Field::T0Survey => FieldValue::Text(&self.t0_survey),
            Field::TeSurvey => FieldValue::Float(self.te_survey),
            Field::MagLast => FieldValue::Float(self.mag_last),
            Field::DeltaTLast => FieldValue::Float(self.delta_t_last),
            Field::MagModel => FieldValue::Float(self.mag_model),
            Field::CadenceHrs => FieldValue::Float(self.cadence_hrs),
            Field::SpitzerPriority => FieldValue::Text(&self.spitzer_priority),
            Field::GroundPriority => FieldValue::Text(&self.ground_priority),
            Field::SurveyCadence => FieldValue::Text(&self.survey_cadence),
            Field::ObserversList => FieldValue::Text(&self.observers_list),
        }
    }

    fn slot_mut(&mut self, field: Field) -> Slot<'_> {
        match field {
            Field::ShortName => Slot::Text(&mut self.short_name),
            Field::Ra => Slot::Text(&mut self.ra),
            Field::Dec => Slot::Text(&mut self.dec),
            Field::A0Survey => Slot::Float(&mut self.a0_survey),
            Field::T0Survey => Slot::Text(&mut self.t0_survey),
            Field::TeSurvey => Slot::Float(&mut self.te_survey),
            Field::MagLast => Slot::Float(&mut self.mag_last),
            Field::DeltaTLast => Slot::Float(&mut self.delta_t_last),
            Field::MagModel => Slot::Float(&mut self.mag_model),
            Field::CadenceHrs => Slot::Float(&mut self.cadence_hrs),
            Field::SpitzerPriority => Slot::Text(&mut self.spitzer_priority),
            Field::GroundPriority => Slot::Text(&mut self.ground_priority),
            Field::SurveyCadence => Slot::Text(&mut self.survey_cadence),
            Field::ObserversList => Slot::Text(&mut self.observers_list),
        }
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }
}

/// "none" anywhere in the token reads as zero. `nan`/`inf` are rejected: they
/// would not compare equal after a write and read.
fn parse_number(field: &'static str, token: &str) -> Result<f64, RowError> {
    if token.to_ascii_lowercase().contains("none") {
        return Ok(0.0);
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::BadNumber { field, token: s!(token) })
}
