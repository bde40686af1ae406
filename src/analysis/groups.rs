//! Shared grouping passes over the record table
//!
//! Every calculator starts from one of these single-pass aggregations.
//! All of them are pure reads of the input slice.

use crate::domain::{MovementRecord, ObjectId, ZoneId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Distinct zones visited by each object
pub fn zones_by_object(records: &[MovementRecord]) -> FxHashMap<ObjectId, FxHashSet<ZoneId>> {
    let mut zones: FxHashMap<ObjectId, FxHashSet<ZoneId>> = FxHashMap::default();
    for record in records {
        zones.entry(record.object_id).or_default().insert(record.zone_id);
    }
    zones
}

/// Distinct objects seen in each zone
pub fn visitors_by_zone(records: &[MovementRecord]) -> FxHashMap<ZoneId, FxHashSet<ObjectId>> {
    let mut visitors: FxHashMap<ZoneId, FxHashSet<ObjectId>> = FxHashMap::default();
    for record in records {
        visitors.entry(record.zone_id).or_default().insert(record.object_id);
    }
    visitors
}

/// Distinct objects with at least one entrance-zone row
pub fn entrance_visitors(records: &[MovementRecord]) -> FxHashSet<ObjectId> {
    records
        .iter()
        .filter(|r| r.zone_id.is_entrance())
        .map(|r| r.object_id)
        .collect()
}

/// Row count contributed by each object
pub fn records_per_object(records: &[MovementRecord]) -> FxHashMap<ObjectId, u64> {
    let mut counts: FxHashMap<ObjectId, u64> = FxHashMap::default();
    for record in records {
        *counts.entry(record.object_id).or_insert(0) += 1;
    }
    counts
}
