//! Error types for record normalization.
//!
//! Date parsing is the only fallible step in normalization, and its errors
//! never escape [`crate::record::normalize`]: they are folded into
//! [`crate::record::OccurredOn::Invalid`] so aggregation can route the record
//! to the `Unknown` bucket.

use thiserror::Error;

/// Why a wire date string could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The string matches none of the accepted date shapes.
    #[error("unrecognized date format: '{raw}'")]
    Unrecognized { raw: String },

    /// The date parsed, but its year cannot be written as four digits.
    #[error("year {year} is outside 0000-9999")]
    YearOutOfRange { year: i32 },
}
