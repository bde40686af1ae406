//! Headline counters for a loaded dataset

use crate::analysis::groups;
use crate::domain::MovementRecord;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Headline statistics for the whole dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_records: u64,
    pub unique_objects: u64,
    pub unique_zones: u64,
    /// Distinct objects with at least one entrance-zone row
    pub unique_entrance_enters: u64,
    /// Min/max parseable entry timestamp, `None` when nothing parses
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Compute headline counters and the best-effort entry-time range.
///
/// Date parsing is deliberately lenient: sentinel and unparseable values
/// are skipped, and an unusable column degrades to `date_range: None`
/// rather than an error.
pub fn summary_statistics(records: &[MovementRecord]) -> SummaryStats {
    let objects: FxHashSet<_> = records.iter().map(|r| r.object_id).collect();
    let zones: FxHashSet<_> = records.iter().map(|r| r.zone_id).collect();
    let entered = groups::entrance_visitors(records);

    let mut date_range: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for record in records {
        let Some(parsed) = record.entry_time.parse_utc() else {
            continue;
        };
        date_range = Some(match date_range {
            None => (parsed, parsed),
            Some((min, max)) => (min.min(parsed), max.max(parsed)),
        });
    }

    SummaryStats {
        total_records: records.len() as u64,
        unique_objects: objects.len() as u64,
        unique_zones: zones.len() as u64,
        unique_entrance_enters: entered.len() as u64,
        date_range,
    }
}
