//! Records-per-object distribution across the fixed bucket categories

use crate::analysis::groups;
use crate::domain::{MovementRecord, RecordBucket};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Object count and share for one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketShare {
    #[serde(rename = "Records per Object")]
    pub bucket: RecordBucket,
    #[serde(rename = "Number of Objects")]
    pub objects: u64,
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

/// Moments of the per-object row-count distribution
///
/// `std_dev` is the sample standard deviation and is NaN below two objects;
/// mean and median are NaN on an empty dataset. NaN serializes to JSON null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSizeStats {
    pub mean: f64,
    pub median: f64,
    pub min: u64,
    pub max: u64,
    pub std_dev: f64,
}

impl GroupSizeStats {
    fn from_sorted(sizes: &[u64]) -> Self {
        let n = sizes.len();
        if n == 0 {
            return Self { mean: f64::NAN, median: f64::NAN, min: 0, max: 0, std_dev: f64::NAN };
        }

        let sum: u64 = sizes.iter().sum();
        let mean = sum as f64 / n as f64;

        let median = if n % 2 == 1 {
            sizes[n / 2] as f64
        } else {
            (sizes[n / 2 - 1] + sizes[n / 2]) as f64 / 2.0
        };

        let std_dev = if n < 2 {
            f64::NAN
        } else {
            let squared_diff: f64 =
                sizes.iter().map(|&s| (s as f64 - mean).powi(2)).sum();
            (squared_diff / (n - 1) as f64).sqrt()
        };

        Self { mean, median, min: sizes[0], max: sizes[n - 1], std_dev }
    }
}

/// Bucket objects by their row count and describe the distribution.
///
/// All six buckets are always emitted in order; their object counts sum to
/// the distinct object count, and percentages are 0 on an empty dataset.
pub fn records_distribution(records: &[MovementRecord]) -> (Vec<BucketShare>, GroupSizeStats) {
    let counts = groups::records_per_object(records);

    let mut sizes: Vec<u64> = counts.values().copied().collect();
    sizes.sort_unstable();
    let stats = GroupSizeStats::from_sorted(&sizes);

    let mut per_bucket: FxHashMap<RecordBucket, u64> = FxHashMap::default();
    for &size in &sizes {
        *per_bucket.entry(RecordBucket::for_count(size)).or_insert(0) += 1;
    }

    let total = sizes.len() as u64;
    let shares = RecordBucket::ALL
        .iter()
        .map(|&bucket| {
            let objects = per_bucket.get(&bucket).copied().unwrap_or(0);
            let percentage =
                if total > 0 { objects as f64 / total as f64 * 100.0 } else { 0.0 };
            BucketShare { bucket, objects, percentage }
        })
        .collect();

    (shares, stats)
}
