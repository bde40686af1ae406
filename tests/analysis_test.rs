//! Integration tests for the full analysis pipeline over CSV input

use gmr_analysis::analysis::{
    conversion_counts, enter_exit_analysis, group_size_histogram, missing_entrance_share,
    records_distribution, summary_statistics, zone_frequency,
};
use gmr_analysis::domain::{MovementRecord, ZoneId};
use gmr_analysis::io::load_csv;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "global_object_id,zone_id,zone_entry_time,zone_exit_time,dwell_time\n";

fn write_csv(rows: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    file.write_all(rows.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_three_object_scenario() {
    // Object 1 visits zones 1,2,3 - object 2 only zone 2 - object 3 zones 1,4
    let file = write_csv(
        "1,1,2024-05-01 09:00:00,2024-05-01 09:01:00,60.0\n\
         1,2,2024-05-01 09:02:00,2024-05-01 09:05:00,180.0\n\
         1,3,2024-05-01 09:06:00,-1,0.0\n\
         2,2,2024-05-01 09:10:00,2024-05-01 09:12:00,120.0\n\
         3,1,2024-05-01 09:20:00,2024-05-01 09:21:00,60.0\n\
         3,4,2024-05-01 09:22:00,2024-05-01 09:30:00,480.0\n",
    );
    let records = load_csv(file.path()).unwrap();

    // Conversion: object 2 never entered, so every zone converts exactly one object
    let conversions = conversion_counts(&records);
    let pairs: Vec<(i32, u64)> =
        conversions.iter().map(|c| (c.zone_id.0, c.conversion_count)).collect();
    assert_eq!(pairs, vec![(2, 1), (3, 1), (4, 1)]);

    // Missing entrance: only object 2
    let missing = missing_entrance_share(&records);
    assert_eq!(missing.missing_count, 1);
    assert_eq!(missing.total_count, 3);
    assert!((missing.percentage - 100.0 / 3.0).abs() < 0.01);

    // Cumulative zone counts for the two entrance visitors (3 and 2 zones)
    let frequency = zone_frequency(&records);
    let counts: Vec<u64> = frequency.iter().map(|row| row.count).collect();
    assert_eq!(counts, vec![2, 2, 1, 0, 0]);

    // Summary
    let stats = summary_statistics(&records);
    assert_eq!(stats.total_records, 6);
    assert_eq!(stats.unique_objects, 3);
    assert_eq!(stats.unique_zones, 4);
    assert_eq!(stats.unique_entrance_enters, 2);
    assert!(stats.date_range.is_some());
}

#[test]
fn test_empty_dataset_is_all_zeros_and_no_panics() {
    let file = write_csv("");
    let records = load_csv(file.path()).unwrap();
    assert!(records.is_empty());

    assert!(conversion_counts(&records).is_empty());

    let frequency = zone_frequency(&records);
    assert_eq!(frequency.len(), 5);
    assert!(frequency.iter().all(|row| row.count == 0));

    let missing = missing_entrance_share(&records);
    assert_eq!(missing.percentage, 0.0);
    assert_eq!(missing.total_count, 0);

    let stats = summary_statistics(&records);
    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.date_range, None);

    let (shares, size_stats) = records_distribution(&records);
    assert!(shares.iter().all(|s| s.objects == 0 && s.percentage == 0.0));
    assert!(size_stats.mean.is_nan());

    let (exit_rows, exit_summary) = enter_exit_analysis(&records);
    assert!(exit_rows.is_empty());
    assert_eq!(exit_summary.exit_percentage, 0.0);

    assert!(group_size_histogram(&records, 50).is_empty());
}

#[test]
fn test_exit_sentinel_in_both_encodings() {
    // CSV carries the sentinel as the field text "-1"; JSON input can carry
    // it as a number or a string. All three must classify as no-exit.
    let file = write_csv("1,1,-1,-1,0.0\n");
    let from_csv = load_csv(file.path()).unwrap();

    let from_number: MovementRecord = serde_json::from_str(
        r#"{"global_object_id": 2, "zone_id": 1, "zone_entry_time": "-1",
            "zone_exit_time": -1, "dwell_time": 0.0}"#,
    )
    .unwrap();
    let from_string: MovementRecord = serde_json::from_str(
        r#"{"global_object_id": 3, "zone_id": 1, "zone_entry_time": "-1",
            "zone_exit_time": "-1", "dwell_time": 0.0}"#,
    )
    .unwrap();

    let mut records = from_csv;
    records.push(from_number);
    records.push(from_string);

    let (_, summary) = enter_exit_analysis(&records);
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.with_exit, 0);
    assert_eq!(summary.without_exit, 3);
}

#[test]
fn test_distribution_and_histogram_agree_on_object_count() {
    // Objects with 1, 3, 3, 7 and 60 rows
    let mut rows = String::new();
    let sizes = [(1i64, 1u64), (2, 3), (3, 3), (4, 7), (5, 60)];
    for &(object, count) in &sizes {
        for _ in 0..count {
            rows.push_str(&format!("{},1,-1,-1,0.0\n", object));
        }
    }
    let file = write_csv(&rows);
    let records = load_csv(file.path()).unwrap();

    let (shares, size_stats) = records_distribution(&records);
    let bucket_total: u64 = shares.iter().map(|s| s.objects).sum();
    assert_eq!(bucket_total, 5);
    let percentage_total: f64 = shares.iter().map(|s| s.percentage).sum();
    assert!((percentage_total - 100.0).abs() < 1e-9);
    assert_eq!(size_stats.min, 1);
    assert_eq!(size_stats.max, 60);

    let histogram = group_size_histogram(&records, 50);
    let frequency_total: u64 = histogram.iter().map(|row| row.frequency).sum();
    assert_eq!(frequency_total, 5);

    // Per-bucket exit rows balance against the grand total
    let (exit_rows, exit_summary) = enter_exit_analysis(&records);
    for row in &exit_rows {
        assert_eq!(row.with_exit + row.without_exit, row.total_records);
    }
    let exit_total: u64 = exit_rows.iter().map(|row| row.total_records).sum();
    assert_eq!(exit_total, exit_summary.total_records);
}

#[test]
fn test_entrance_never_appears() {
    let file = write_csv(
        "1,2,-1,-1,0.0\n\
         2,3,-1,-1,0.0\n",
    );
    let records = load_csv(file.path()).unwrap();

    let conversions = conversion_counts(&records);
    assert_eq!(conversions.len(), 2);
    assert!(conversions.iter().all(|c| c.conversion_count == 0));
    assert!(conversions.iter().all(|c| c.zone_id != ZoneId::ENTRANCE));

    let missing = missing_entrance_share(&records);
    assert_eq!(missing.missing_count, 2);
    assert!((missing.percentage - 100.0).abs() < 1e-9);
}

#[test]
fn test_date_range_degrades_on_unparseable_values() {
    let file = write_csv(
        "1,1,garbage,-1,0.0\n\
         2,2,also garbage,-1,0.0\n",
    );
    let records = load_csv(file.path()).unwrap();

    let stats = summary_statistics(&records);
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.date_range, None);
}
