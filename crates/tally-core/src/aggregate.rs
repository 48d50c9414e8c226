//! Aggregation engine: records in, ordered chart-ready series out.
//!
//! Both aggregations are pure. Input order matters for tag-frequency tie
//! breaking; nothing here reorders the input slice.

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::record::{ItemKind, OccurredOn, Record};

// ---------------------------------------------------------------------------
// Series entry types
// ---------------------------------------------------------------------------

/// How many times a tag name was seen across all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFrequencyEntry {
    pub tag_name: String,
    pub occurrence_count: u64,
}

/// Bucket label for the by-year series.
///
/// Variant order is the sort order: every year sorts before `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub enum YearLabel {
    Year(u16),
    Unknown,
}

impl YearLabel {
    fn for_record(record: &Record) -> Self {
        match &record.occurred_on {
            OccurredOn::Valid(date) => u16::try_from(date.year())
                .ok()
                .filter(|year| *year <= 9999)
                .map_or(Self::Unknown, Self::Year),
            OccurredOn::Absent => Self::Unknown,
            OccurredOn::Invalid(raw) => {
                tracing::warn!(
                    id = %record.id,
                    kind = %record.kind,
                    date = %raw,
                    "failed to parse date; counting under Unknown"
                );
                Self::Unknown
            }
        }
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year:04}"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl From<YearLabel> for String {
    fn from(label: YearLabel) -> Self {
        label.to_string()
    }
}

/// Summed mark count for one year label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearBucket {
    pub label: YearLabel,
    pub summed_mark_count: u64,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Count tag occurrences across `records`, most frequent first.
///
/// Every tag entry on every record counts once, regardless of the record's
/// mark count. Names are compared exactly. Ties keep first-seen order, and
/// the result holds at most `limit` entries.
#[must_use]
pub fn tag_frequency(records: &[Record], limit: usize) -> Vec<TagFrequencyEntry> {
    if limit == 0 {
        return Vec::new();
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<TagFrequencyEntry> = Vec::new();
    for tag in records.iter().flat_map(|record| record.tags.iter()) {
        if let Some(&index) = positions.get(tag.name.as_str()) {
            entries[index].occurrence_count += 1;
        } else {
            positions.insert(tag.name.as_str(), entries.len());
            entries.push(TagFrequencyEntry {
                tag_name: tag.name.clone(),
                occurrence_count: 1,
            });
        }
    }

    // `sort_by` is stable, so equal counts stay in insertion order.
    entries.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));
    entries.truncate(limit);
    entries
}

/// Sum mark counts per year of `occurred_on`, years ascending, `Unknown` last.
///
/// Records without a mark count are skipped. A mark count of zero still
/// creates its bucket. Records with a missing or unparsable date land in
/// `Unknown`; unparsable ones are logged for operators.
#[must_use]
pub fn mark_count_by_year(records: &[Record]) -> Vec<YearBucket> {
    let mut sums: BTreeMap<YearLabel, u64> = BTreeMap::new();
    for record in records {
        let Some(marks) = record.mark_count else {
            continue;
        };
        let sum = sums.entry(YearLabel::for_record(record)).or_insert(0);
        *sum = sum.saturating_add(marks);
    }

    sums.into_iter()
        .map(|(label, summed_mark_count)| YearBucket {
            label,
            summed_mark_count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// StatsReport
// ---------------------------------------------------------------------------

/// Both chart series for one render cycle plus headline counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub item_count: usize,
    pub scene_count: usize,
    pub image_count: usize,
    pub total_mark_count: u64,
    pub tag_frequency: Vec<TagFrequencyEntry>,
    pub mark_count_by_year: Vec<YearBucket>,
}

impl StatsReport {
    #[must_use]
    pub fn build(records: &[Record], tag_limit: usize) -> Self {
        let count_kind = |kind: ItemKind| records.iter().filter(|r| r.kind == kind).count();
        Self {
            item_count: records.len(),
            scene_count: count_kind(ItemKind::Scene),
            image_count: count_kind(ItemKind::Image),
            total_mark_count: records
                .iter()
                .filter_map(|r| r.mark_count)
                .fold(0u64, u64::saturating_add),
            tag_frequency: tag_frequency(records, tag_limit),
            mark_count_by_year: mark_count_by_year(records),
        }
    }

    /// Parallel label/value vectors for the tag chart.
    #[must_use]
    pub fn tag_series(&self) -> (Vec<String>, Vec<u64>) {
        self.tag_frequency
            .iter()
            .map(|entry| (entry.tag_name.clone(), entry.occurrence_count))
            .unzip()
    }

    /// Parallel label/value vectors for the by-year chart.
    #[must_use]
    pub fn year_series(&self) -> (Vec<String>, Vec<u64>) {
        self.mark_count_by_year
            .iter()
            .map(|bucket| (bucket.label.to_string(), bucket.summed_mark_count))
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Tag;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(id: &str, marks: Option<u64>, date: OccurredOn, tags: &[&str]) -> Record {
        Record {
            id: id.to_string(),
            kind: ItemKind::Scene,
            title: None,
            mark_count: marks,
            occurred_on: date,
            tags: tags
                .iter()
                .map(|name| Tag {
                    id: format!("t-{name}"),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    fn on(year: i32, month: u32, day: u32) -> OccurredOn {
        OccurredOn::Valid(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn tag_frequency_ties_follow_input_order() {
        let records = vec![
            record("1", Some(1), OccurredOn::Absent, &["A", "B"]),
            record("2", Some(1), OccurredOn::Absent, &["A"]),
            record("3", Some(1), OccurredOn::Absent, &["B"]),
        ];
        let entries = tag_frequency(&records, 10);
        assert_eq!(
            entries,
            vec![
                TagFrequencyEntry {
                    tag_name: "A".into(),
                    occurrence_count: 2
                },
                TagFrequencyEntry {
                    tag_name: "B".into(),
                    occurrence_count: 2
                },
            ]
        );
    }

    #[test]
    fn tag_frequency_ignores_mark_count() {
        let records = vec![
            record("1", None, OccurredOn::Absent, &["A"]),
            record("2", Some(0), OccurredOn::Absent, &["A"]),
        ];
        assert_eq!(tag_frequency(&records, 5)[0].occurrence_count, 2);
    }

    #[test]
    fn tag_frequency_is_case_sensitive() {
        let records = vec![record("1", Some(1), OccurredOn::Absent, &["tag", "Tag"])];
        assert_eq!(tag_frequency(&records, 5).len(), 2);
    }

    #[test]
    fn tag_frequency_counts_repeated_tags_within_one_item() {
        let records = vec![record("1", Some(1), OccurredOn::Absent, &["A", "A"])];
        assert_eq!(tag_frequency(&records, 5)[0].occurrence_count, 2);
    }

    #[test]
    fn tag_frequency_truncates_after_sorting() {
        let records = vec![
            record("1", Some(1), OccurredOn::Absent, &["rare"]),
            record("2", Some(1), OccurredOn::Absent, &["common"]),
            record("3", Some(1), OccurredOn::Absent, &["common"]),
        ];
        let entries = tag_frequency(&records, 1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tag_name, "common");
    }

    #[test]
    fn tag_frequency_zero_limit_and_empty_input() {
        let records = vec![record("1", Some(1), OccurredOn::Absent, &["A"])];
        assert!(tag_frequency(&records, 0).is_empty());
        assert!(tag_frequency(&[], 10).is_empty());
        assert!(tag_frequency(&[record("1", Some(1), OccurredOn::Absent, &[])], 10).is_empty());
    }

    #[test]
    fn by_year_sums_and_puts_unknown_last() {
        let records = vec![
            record("1", Some(3), on(2020, 5, 1), &[]),
            record("2", Some(2), on(2020, 11, 1), &[]),
            record("3", Some(5), OccurredOn::Absent, &[]),
        ];
        let buckets = mark_count_by_year(&records);
        assert_eq!(
            buckets,
            vec![
                YearBucket {
                    label: YearLabel::Year(2020),
                    summed_mark_count: 5
                },
                YearBucket {
                    label: YearLabel::Unknown,
                    summed_mark_count: 5
                },
            ]
        );
    }

    #[test]
    fn by_year_keeps_zero_and_skips_missing() {
        let records = vec![
            record("1", Some(0), on(2019, 1, 1), &[]),
            record("2", None, on(2018, 1, 1), &[]),
        ];
        let buckets = mark_count_by_year(&records);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, YearLabel::Year(2019));
        assert_eq!(buckets[0].summed_mark_count, 0);
    }

    #[test]
    fn by_year_routes_invalid_dates_to_unknown() {
        let records = vec![
            record("1", Some(4), OccurredOn::Invalid("soon".into()), &[]),
            record("2", Some(1), on(2001, 2, 3), &[]),
        ];
        let buckets = mark_count_by_year(&records);
        assert_eq!(buckets.last().unwrap().label, YearLabel::Unknown);
        assert_eq!(buckets.last().unwrap().summed_mark_count, 4);
        assert_eq!(buckets[0].label, YearLabel::Year(2001));
    }

    #[test]
    fn by_year_orders_years_ascending() {
        let records = vec![
            record("1", Some(1), on(2022, 1, 1), &[]),
            record("2", Some(1), OccurredOn::Absent, &[]),
            record("3", Some(1), on(1999, 1, 1), &[]),
            record("4", Some(1), on(2010, 1, 1), &[]),
        ];
        let labels: Vec<String> = mark_count_by_year(&records)
            .iter()
            .map(|b| b.label.to_string())
            .collect();
        assert_eq!(labels, vec!["1999", "2010", "2022", "Unknown"]);
    }

    #[test]
    fn year_label_pads_to_four_digits() {
        assert_eq!(YearLabel::Year(987).to_string(), "0987");
        assert_eq!(
            serde_json::to_value(YearLabel::Unknown).unwrap(),
            serde_json::json!("Unknown")
        );
    }

    #[test]
    fn report_series_are_parallel() {
        let mut image = record("9", Some(7), on(2021, 6, 1), &["A"]);
        image.kind = ItemKind::Image;
        let records = vec![
            record("1", Some(3), on(2020, 5, 1), &["A", "B"]),
            record("2", None, OccurredOn::Absent, &["B"]),
            image,
        ];
        let report = StatsReport::build(&records, 10);

        assert_eq!(report.item_count, 3);
        assert_eq!(report.scene_count, 2);
        assert_eq!(report.image_count, 1);
        assert_eq!(report.total_mark_count, 10);

        let (tag_labels, tag_values) = report.tag_series();
        assert_eq!(tag_labels, vec!["A", "B"]);
        assert_eq!(tag_values, vec![2, 2]);

        let (year_labels, year_values) = report.year_series();
        assert_eq!(year_labels, vec!["2020", "2021"]);
        assert_eq!(year_values, vec![3, 7]);
    }
}
