//! Exact records-per-object frequency histogram with an overflow bin

use crate::analysis::groups;
use crate::domain::MovementRecord;
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

/// Default upper bound for exact bins
pub const DEFAULT_HISTOGRAM_MAX: u64 = 50;

/// Histogram bin key: an exact row count or the overflow bin
///
/// Serializes the way the report consumers expect: exact counts as numbers,
/// the overflow bin as a `">50"`-style string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsBin {
    Exact(u64),
    Over(u64),
}

impl Serialize for RecordsBin {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RecordsBin::Exact(count) => serializer.serialize_u64(*count),
            RecordsBin::Over(bound) => serializer.serialize_str(&format!(">{}", bound)),
        }
    }
}

impl std::fmt::Display for RecordsBin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordsBin::Exact(count) => write!(f, "{}", count),
            RecordsBin::Over(bound) => write!(f, ">{}", bound),
        }
    }
}

/// One histogram row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramRow {
    #[serde(rename = "Records")]
    pub records: RecordsBin,
    #[serde(rename = "Frequency")]
    pub frequency: u64,
}

/// Frequency of exact per-object row counts from 1 to `max_value`, skipping
/// empty bins, plus one aggregate bin for objects above the bound.
///
/// Frequencies sum to the distinct object count.
pub fn group_size_histogram(records: &[MovementRecord], max_value: u64) -> Vec<HistogramRow> {
    let counts = groups::records_per_object(records);

    let mut frequency_by_size: FxHashMap<u64, u64> = FxHashMap::default();
    let mut above_max = 0u64;
    for &size in counts.values() {
        if size > max_value {
            above_max += 1;
        } else {
            *frequency_by_size.entry(size).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<HistogramRow> = (1..=max_value)
        .filter_map(|size| {
            let frequency = *frequency_by_size.get(&size)?;
            Some(HistogramRow { records: RecordsBin::Exact(size), frequency })
        })
        .collect();

    if above_max > 0 {
        rows.push(HistogramRow { records: RecordsBin::Over(max_value), frequency: above_max });
    }

    rows
}
