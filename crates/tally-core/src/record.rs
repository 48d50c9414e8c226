//! Wire item shape and the normalized [`Record`].
//!
//! [`RawItem`] is the only type in the workspace that mirrors the media
//! server's JSON. Everything downstream works on [`Record`], produced by
//! [`normalize`]. Normalization never fails: missing optional fields become
//! `None`/empty, and an unparsable date becomes [`OccurredOn::Invalid`].

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DateParseError;

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

/// The two item kinds that carry a mark count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Video-like items.
    Scene,
    /// Image-like items.
    Image,
}

impl ItemKind {
    pub const ALL: [Self; 2] = [Self::Scene, Self::Image];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Image => "image",
        }
    }

    /// Root query field, e.g. `findScenes`.
    #[must_use]
    pub const fn query_field(self) -> &'static str {
        match self {
            Self::Scene => "findScenes",
            Self::Image => "findImages",
        }
    }

    /// List field inside the root query result, e.g. `scenes`.
    #[must_use]
    pub const fn list_field(self) -> &'static str {
        match self {
            Self::Scene => "scenes",
            Self::Image => "images",
        }
    }

    /// Name of the filter variable passed to the root query.
    #[must_use]
    pub const fn filter_variable(self) -> &'static str {
        match self {
            Self::Scene => "scene_filter",
            Self::Image => "image_filter",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// Tag reference as returned by the media server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTag {
    pub id: String,
    pub name: String,
}

/// One scene or image as returned by the media server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub o_counter: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<RawTag>>,
}

// ---------------------------------------------------------------------------
// Normalized shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Calendar date used for temporal bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum OccurredOn {
    /// No date on the item.
    Absent,
    Valid(NaiveDate),
    /// A date was present but could not be parsed; keeps the raw text for
    /// diagnostics.
    Invalid(String),
}

/// Read-only projection of one media item, shared by both item kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub kind: ItemKind,
    pub title: Option<String>,
    /// `None` means "no data", which is distinct from zero.
    pub mark_count: Option<u64>,
    pub occurred_on: OccurredOn,
    /// Tags in server order. Duplicates are kept.
    pub tags: Vec<Tag>,
}

/// Normalize one wire item into a [`Record`].
///
/// A negative counter is treated as missing data. Tag lists are taken as-is,
/// including repeated names.
#[must_use]
pub fn normalize(raw: RawItem, kind: ItemKind) -> Record {
    let mark_count = raw.o_counter.and_then(|value| u64::try_from(value).ok());
    let occurred_on = match raw.date.as_deref().map(str::trim) {
        None | Some("") => OccurredOn::Absent,
        Some(text) => match parse_occurred_on(text) {
            Ok(date) => OccurredOn::Valid(date),
            Err(_) => OccurredOn::Invalid(text.to_string()),
        },
    };
    let tags = raw
        .tags
        .unwrap_or_default()
        .into_iter()
        .map(|tag| Tag {
            id: tag.id,
            name: tag.name,
        })
        .collect();

    Record {
        id: raw.id,
        kind,
        title: raw.title,
        mark_count,
        occurred_on,
        tags,
    }
}

/// Parse a wire date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps. Partial dates resolve to the first day of
/// the period.
///
/// # Errors
///
/// Returns [`DateParseError::Unrecognized`] when no shape matches and
/// [`DateParseError::YearOutOfRange`] when the year needs more than four
/// digits or is negative.
pub fn parse_occurred_on(text: &str) -> Result<NaiveDate, DateParseError> {
    let date = parse_date_shape(text).ok_or_else(|| DateParseError::Unrecognized {
        raw: text.to_string(),
    })?;
    if !(0..=9999).contains(&date.year()) {
        return Err(DateParseError::YearOutOfRange { year: date.year() });
    }
    Ok(date)
}

fn parse_date_shape(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(timestamp.date());
    }

    let mut parts = text.split('-');
    let year = parse_fixed_digits(parts.next()?, 4)?;
    let month = match parts.next() {
        Some(month) => parse_fixed_digits(month, 2)?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)
}

fn parse_fixed_digits(part: &str, width: usize) -> Option<u32> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
