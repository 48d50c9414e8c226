//! # tally-core
//!
//! Record model and aggregation engine for tally.
//!
//! This crate provides the pure, I/O-free half of the statistics pipeline:
//! - The wire item shape returned by the media server ([`RawItem`])
//! - Normalization into the single in-memory [`Record`] shape
//! - Tag-frequency and mark-count-by-year aggregations
//! - The [`StatsReport`] bundle consumed by the view and the CLI

pub mod aggregate;
pub mod errors;
pub mod record;

pub use aggregate::{
    StatsReport, TagFrequencyEntry, YearBucket, YearLabel, mark_count_by_year, tag_frequency,
};
pub use errors::DateParseError;
pub use record::{ItemKind, OccurredOn, RawItem, RawTag, Record, Tag, normalize, parse_occurred_on};
