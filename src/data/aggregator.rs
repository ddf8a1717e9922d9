//! Aggregator Module
//! Turns validated rows into per-(type, year) occurrence counts.

use crate::data::records::{ParseOutcome, RawRecord, SkipReason, ValidRecord};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Count of disasters of one type in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub disaster_type: String,
    pub year: i32,
    pub value: u64,
}

/// Row counts gathered while aggregating, for the load log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub missing_type: usize,
    pub invalid_year: usize,
}

impl AggregationReport {
    pub fn skipped(&self) -> usize {
        self.missing_type + self.invalid_year
    }
}

/// Output of aggregation: the metric table and the sorted category labels.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub rows: Vec<MetricRow>,
    pub categories: Vec<String>,
    pub report: AggregationReport,
}

impl Aggregation {
    /// Smallest and largest year present in the table.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.rows.iter().map(|r| r.year).min()?;
        let max = self.rows.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

/// Groups valid records by (disaster type, year).
pub struct Aggregator;

impl Aggregator {
    /// Filter, order and count the input rows.
    ///
    /// Rows are ordered by (type, year) before grouping, so the emitted
    /// `MetricRow`s come out in that order as well.
    pub fn aggregate<I>(records: I) -> Aggregation
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut report = AggregationReport::default();
        let mut valid: Vec<ValidRecord> = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            report.total_rows += 1;
            match record.classify() {
                ParseOutcome::Valid(record) => valid.push(record),
                ParseOutcome::Skipped(reason) => {
                    debug!(row = index, ?reason, "skipping row");
                    match reason {
                        SkipReason::MissingType => report.missing_type += 1,
                        SkipReason::InvalidYear => report.invalid_year += 1,
                    }
                }
            }
        }
        report.valid_rows = valid.len();

        // Stable sort keeps input order among equal keys
        valid.sort_by(|a, b| {
            a.disaster_type
                .cmp(&b.disaster_type)
                .then(a.year.cmp(&b.year))
        });

        let rows = Self::count_runs(&valid);

        let categories: Vec<String> = rows
            .iter()
            .map(|r| r.disaster_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        info!(
            total = report.total_rows,
            valid = report.valid_rows,
            skipped = report.skipped(),
            metric_rows = rows.len(),
            categories = categories.len(),
            "aggregated disaster records"
        );

        Aggregation {
            rows,
            categories,
            report,
        }
    }

    /// Count consecutive equal keys of an already sorted slice.
    fn count_runs(sorted: &[ValidRecord]) -> Vec<MetricRow> {
        let mut rows: Vec<MetricRow> = Vec::new();

        for record in sorted {
            if let Some(last) = rows.last_mut() {
                if last.disaster_type == record.disaster_type && last.year == record.year {
                    last.value += 1;
                    continue;
                }
            }
            rows.push(MetricRow {
                disaster_type: record.disaster_type.clone(),
                year: record.year,
                value: 1,
            });
        }

        rows
    }
}
