//! Share of objects that never passed through the entrance zone

use crate::analysis::groups;
use crate::domain::MovementRecord;
use serde::Serialize;

/// Missing-entrance result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntrance {
    /// Percentage of distinct objects with no entrance-zone row (0 when empty)
    pub percentage: f64,
    pub missing_count: u64,
    pub total_count: u64,
}

/// Fraction of distinct objects that never visited zone 1.
pub fn missing_entrance_share(records: &[MovementRecord]) -> MissingEntrance {
    let zones = groups::zones_by_object(records);
    let entered = groups::entrance_visitors(records);

    let total_count = zones.len() as u64;
    let missing_count = total_count - entered.len() as u64;
    let percentage = if total_count > 0 {
        missing_count as f64 / total_count as f64 * 100.0
    } else {
        0.0
    };

    MissingEntrance { percentage, missing_count, total_count }
}
