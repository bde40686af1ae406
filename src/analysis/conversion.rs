//! Entrance conversion - who reached each zone after entering through zone 1

use crate::analysis::groups;
use crate::domain::{MovementRecord, ZoneId};
use serde::Serialize;

/// Conversion count for one non-entrance zone
///
/// Serialized field names are part of the report contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneConversion {
    #[serde(rename = "Zone ID")]
    pub zone_id: ZoneId,
    #[serde(rename = "Unique Conversion Count")]
    pub conversion_count: u64,
}

/// Count distinct objects that visited both the entrance and each other zone.
///
/// One row per non-entrance zone present in the data, sorted by zone id
/// ascending. Empty when zone 1 is the only zone; all-zero counts when
/// zone 1 never appears.
pub fn conversion_counts(records: &[MovementRecord]) -> Vec<ZoneConversion> {
    let visitors = groups::visitors_by_zone(records);

    let entrance = visitors.get(&ZoneId::ENTRANCE);

    let mut zones: Vec<ZoneId> =
        visitors.keys().filter(|z| !z.is_entrance()).copied().collect();
    zones.sort();

    zones
        .into_iter()
        .map(|zone_id| {
            let zone_visitors = &visitors[&zone_id];
            let conversion_count = match entrance {
                Some(entered) => {
                    zone_visitors.iter().filter(|object| entered.contains(*object)).count() as u64
                }
                None => 0,
            };
            ZoneConversion { zone_id, conversion_count }
        })
        .collect()
}
