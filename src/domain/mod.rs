//! Domain models - core GMR data types
//!
//! This module contains the canonical data types used throughout the system:
//! - `MovementRecord` - one observed zone visit of a tracked object
//! - `ObjectId` / `ZoneId` - typed identifiers
//! - `TimeField` - timestamp field with `-1` sentinel handling
//! - `RecordBucket` - fixed records-per-object categories

pub mod types;

// Re-export commonly used types at module level
pub use types::{MovementRecord, ObjectId, RecordBucket, TimeField, ZoneId};
