//! Cumulative distribution of distinct zones visited per entrance visitor

use crate::analysis::groups;
use crate::domain::{MovementRecord, ZoneId};
use serde::Serialize;

/// Objects that visited at least `threshold` distinct zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativeZoneCount {
    /// Threshold label, e.g. `"3+"`
    #[serde(rename = "Number of Zones")]
    pub label: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

/// Cumulative zone-visit frequency for objects that entered through zone 1.
///
/// Each object's distinct-zone count includes the entrance itself. Rows run
/// from `1+` up to the largest observed count, and at least through `5+`
/// so the report always has a usable range.
pub fn zone_frequency(records: &[MovementRecord]) -> Vec<CumulativeZoneCount> {
    let zones = groups::zones_by_object(records);

    let zone_counts: Vec<u64> = zones
        .values()
        .filter(|set| set.contains(&ZoneId::ENTRANCE))
        .map(|set| set.len() as u64)
        .collect();

    let max_zones = zone_counts.iter().copied().max().unwrap_or(5);

    (1..=max_zones.max(5))
        .map(|threshold| CumulativeZoneCount {
            label: format!("{}+", threshold),
            count: zone_counts.iter().filter(|&&count| count >= threshold).count() as u64,
        })
        .collect()
}
