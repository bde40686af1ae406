//! Exit-capture analysis: which rows have a recorded exit, overall and per bucket

use crate::analysis::groups;
use crate::domain::{MovementRecord, RecordBucket};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Overall exit-capture counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitSummary {
    pub total_records: u64,
    pub with_exit: u64,
    pub without_exit: u64,
    /// Percentage of rows with a captured exit (0 on empty input)
    pub exit_percentage: f64,
}

/// Exit-capture breakdown for one records-per-object bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketExitRow {
    #[serde(rename = "Records per Object")]
    pub bucket: RecordBucket,
    #[serde(rename = "Total Records")]
    pub total_records: u64,
    #[serde(rename = "With Exit")]
    pub with_exit: u64,
    #[serde(rename = "Without Exit")]
    pub without_exit: u64,
    #[serde(rename = "Exit %")]
    pub exit_percentage: f64,
}

/// Classify every row by exit capture and break the counts down by the
/// records-per-object buckets.
///
/// A row counts as "without exit" only when the exit field carries the `-1`
/// sentinel, in numeric or string form. Buckets with no contributing objects
/// are omitted from the breakdown. The input slice is never mutated; derived
/// flags live in local accumulators.
pub fn enter_exit_analysis(records: &[MovementRecord]) -> (Vec<BucketExitRow>, ExitSummary) {
    let counts = groups::records_per_object(records);

    let total_records = records.len() as u64;
    let with_exit = records.iter().filter(|r| r.has_exit()).count() as u64;
    let summary = ExitSummary {
        total_records,
        with_exit,
        without_exit: total_records - with_exit,
        exit_percentage: if total_records > 0 {
            with_exit as f64 / total_records as f64 * 100.0
        } else {
            0.0
        },
    };

    // One pass: each row lands in its object's bucket
    let mut per_bucket: FxHashMap<RecordBucket, (u64, u64)> = FxHashMap::default();
    for record in records {
        let bucket = RecordBucket::for_count(counts[&record.object_id]);
        let entry = per_bucket.entry(bucket).or_insert((0, 0));
        entry.0 += 1;
        if record.has_exit() {
            entry.1 += 1;
        }
    }

    let rows = RecordBucket::ALL
        .iter()
        .filter_map(|&bucket| {
            let &(total, with) = per_bucket.get(&bucket)?;
            Some(BucketExitRow {
                bucket,
                total_records: total,
                with_exit: with,
                without_exit: total - with,
                exit_percentage: if total > 0 { with as f64 / total as f64 * 100.0 } else { 0.0 },
            })
        })
        .collect();

    (rows, summary)
}
