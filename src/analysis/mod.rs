//! Analysis engine - pure calculators over a loaded record table
//!
//! Each calculator is an independent transformation of the same input slice
//! into one report section. They share the grouping passes in `groups` but
//! no state; any of them can run in any order.
//!
//! - `conversion` - entrance-to-zone conversion counts
//! - `frequency` - cumulative distinct-zones-visited distribution
//! - `missing` - share of objects that never entered through zone 1
//! - `summary` - headline counters and entry-time range
//! - `distribution` - records-per-object bucket shares and moments
//! - `exits` - exit-capture classification, overall and per bucket
//! - `histogram` - exact records-per-object frequency table

pub mod conversion;
pub mod distribution;
pub mod exits;
pub mod frequency;
pub mod groups;
pub mod histogram;
pub mod missing;
pub mod summary;

// Re-export commonly used types
pub use conversion::{conversion_counts, ZoneConversion};
pub use distribution::{records_distribution, BucketShare, GroupSizeStats};
pub use exits::{enter_exit_analysis, BucketExitRow, ExitSummary};
pub use frequency::{zone_frequency, CumulativeZoneCount};
pub use histogram::{group_size_histogram, HistogramRow, RecordsBin, DEFAULT_HISTOGRAM_MAX};
pub use missing::{missing_entrance_share, MissingEntrance};
pub use summary::{summary_statistics, SummaryStats};

#[cfg(test)]
pub(crate) mod test_util {
    use crate::domain::{MovementRecord, ObjectId, TimeField, ZoneId};

    /// Minimal record: times absent, zero dwell
    pub fn record(object: i64, zone: i32) -> MovementRecord {
        MovementRecord {
            object_id: ObjectId(object),
            zone_id: ZoneId(zone),
            entry_time: TimeField::Absent,
            exit_time: TimeField::Absent,
            dwell_time: 0.0,
        }
    }

    /// Record with explicit time fields; `"-1"` means absent
    pub fn record_with_times(
        object: i64,
        zone: i32,
        entry: &str,
        exit: &str,
    ) -> MovementRecord {
        let time_field = |raw: &str| {
            if raw == "-1" {
                TimeField::Absent
            } else {
                TimeField::Raw(raw.to_string())
            }
        };

        MovementRecord {
            object_id: ObjectId(object),
            zone_id: ZoneId(zone),
            entry_time: time_field(entry),
            exit_time: time_field(exit),
            dwell_time: 0.0,
        }
    }
}
