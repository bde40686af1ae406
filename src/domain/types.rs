//! Shared types for GMR analysis

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Newtype wrapper for tracked-object identifiers to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ObjectId(pub i64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype wrapper for zone identifiers to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ZoneId(pub i32);

impl ZoneId {
    /// Zone 1 is the entrance - the canonical starting point of a journey
    pub const ENTRANCE: ZoneId = ZoneId(1);

    #[inline]
    pub fn is_entrance(&self) -> bool {
        *self == Self::ENTRANCE
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp field that may carry the `-1` "not captured" sentinel
///
/// Source data encodes the sentinel either as a number (`-1`) or as the
/// string `"-1"`. Anything else is kept raw and parsed lazily where a real
/// timestamp is needed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TimeField {
    /// Sentinel `-1` in numeric or text form
    #[default]
    Absent,
    /// Raw captured value as it appeared in the source
    Raw(String),
}

impl TimeField {
    /// Whether a value was captured (not the `-1` sentinel)
    #[inline]
    pub fn is_captured(&self) -> bool {
        matches!(self, TimeField::Raw(_))
    }

    /// Best-effort parse to a UTC timestamp.
    ///
    /// Tries RFC 3339, common datetime layouts, bare dates, then epoch
    /// values (12+ digits are milliseconds, shorter integers seconds).
    /// Returns `None` for the sentinel and for anything unparseable.
    pub fn parse_utc(&self) -> Option<DateTime<Utc>> {
        let raw = match self {
            TimeField::Absent => return None,
            TimeField::Raw(s) => s.trim(),
        };
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }

        let n: i64 = raw.parse().ok()?;
        if n.unsigned_abs() >= 100_000_000_000 {
            Utc.timestamp_millis_opt(n).single()
        } else {
            Utc.timestamp_opt(n, 0).single()
        }
    }
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::Absent => write!(f, "-1"),
            TimeField::Raw(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for TimeField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            TimeField::Absent => serializer.serialize_str("-1"),
            TimeField::Raw(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for TimeField {
    fn deserialize<D>(deserializer: D) -> Result<TimeField, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct TimeFieldVisitor;

        impl<'de> Visitor<'de> for TimeFieldVisitor {
            type Value = TimeField;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a timestamp string or number")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeField, E>
            where
                E: de::Error,
            {
                let trimmed = value.trim();
                if trimmed == "-1" {
                    Ok(TimeField::Absent)
                } else {
                    Ok(TimeField::Raw(trimmed.to_string()))
                }
            }

            fn visit_string<E>(self, value: String) -> Result<TimeField, E>
            where
                E: de::Error,
            {
                self.visit_str(&value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<TimeField, E>
            where
                E: de::Error,
            {
                if value == -1 {
                    Ok(TimeField::Absent)
                } else {
                    Ok(TimeField::Raw(value.to_string()))
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<TimeField, E>
            where
                E: de::Error,
            {
                Ok(TimeField::Raw(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<TimeField, E>
            where
                E: de::Error,
            {
                if value == -1.0 {
                    Ok(TimeField::Absent)
                } else {
                    Ok(TimeField::Raw(value.to_string()))
                }
            }
        }

        deserializer.deserialize_any(TimeFieldVisitor)
    }
}

/// One row of GMR input: a tracked object observed in a zone
///
/// Field names map to the external column names of the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    #[serde(rename = "global_object_id")]
    pub object_id: ObjectId,
    pub zone_id: ZoneId,
    #[serde(rename = "zone_entry_time")]
    pub entry_time: TimeField,
    #[serde(rename = "zone_exit_time")]
    pub exit_time: TimeField,
    /// Dwell duration, carried through but not used by any calculator
    pub dwell_time: f64,
}

impl MovementRecord {
    /// Whether an exit was captured for this row
    #[inline]
    pub fn has_exit(&self) -> bool {
        self.exit_time.is_captured()
    }
}

/// Fixed records-per-object categories
///
/// Non-overlapping integer ranges; every positive row count falls into
/// exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordBucket {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2-5")]
    TwoToFive,
    #[serde(rename = "6-10")]
    SixToTen,
    #[serde(rename = "11-20")]
    ElevenToTwenty,
    #[serde(rename = "21-50")]
    TwentyOneToFifty,
    #[serde(rename = ">50")]
    OverFifty,
}

impl RecordBucket {
    /// All buckets in report order
    pub const ALL: [RecordBucket; 6] = [
        RecordBucket::One,
        RecordBucket::TwoToFive,
        RecordBucket::SixToTen,
        RecordBucket::ElevenToTwenty,
        RecordBucket::TwentyOneToFifty,
        RecordBucket::OverFifty,
    ];

    /// Bucket for a per-object row count (count must be >= 1)
    pub fn for_count(count: u64) -> Self {
        match count {
            0..=1 => RecordBucket::One,
            2..=5 => RecordBucket::TwoToFive,
            6..=10 => RecordBucket::SixToTen,
            11..=20 => RecordBucket::ElevenToTwenty,
            21..=50 => RecordBucket::TwentyOneToFifty,
            _ => RecordBucket::OverFifty,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordBucket::One => "1",
            RecordBucket::TwoToFive => "2-5",
            RecordBucket::SixToTen => "6-10",
            RecordBucket::ElevenToTwenty => "11-20",
            RecordBucket::TwentyOneToFifty => "21-50",
            RecordBucket::OverFifty => ">50",
        }
    }
}

impl std::fmt::Display for RecordBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
