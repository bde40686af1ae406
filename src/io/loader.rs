//! CSV ingestion for GMR tables
//!
//! The loader owns the input validation the analysis engine assumes has
//! already happened: required columns are checked up front and reported
//! together with the columns actually present. Malformed rows fail the
//! whole load with a line-numbered error.

use crate::domain::MovementRecord;
use anyhow::{bail, Context};
use std::path::Path;
use tracing::info;

/// Columns a GMR table must carry
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "global_object_id",
    "zone_id",
    "zone_entry_time",
    "zone_exit_time",
    "dwell_time",
];

/// Load a GMR CSV file into memory.
pub fn load_csv(path: impl AsRef<Path>) -> anyhow::Result<Vec<MovementRecord>> {
    let path = path.as_ref();

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open GMR file {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header from {}", path.display()))?
        .clone();
    validate_columns(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize().enumerate() {
        // +2: one for the header line, one for 1-based numbering
        let record: MovementRecord =
            row.with_context(|| format!("Malformed record on line {}", index + 2))?;
        records.push(record);
    }

    info!(file = %path.display(), records = records.len(), "dataset_loaded");

    Ok(records)
}

/// Check required column presence, reporting missing and available names
fn validate_columns(headers: &csv::StringRecord) -> anyhow::Result<()> {
    let available: Vec<&str> = headers.iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !available.contains(column))
        .collect();

    if !missing.is_empty() {
        bail!(
            "Missing required columns: {}. Available columns: {}",
            missing.join(", "),
            available.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ObjectId, TimeField, ZoneId};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_csv(
            "global_object_id,zone_id,zone_entry_time,zone_exit_time,dwell_time\n\
             101,1,2024-05-01 10:00:00,2024-05-01 10:05:00,300.0\n\
             101,2,2024-05-01 10:06:00,-1,0.0\n\
             202,3,-1,-1,12.5\n",
        );

        let records = load_csv(file.path()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].object_id, ObjectId(101));
        assert_eq!(records[0].zone_id, ZoneId(1));
        assert!(records[0].has_exit());
        assert!(!records[1].has_exit());
        assert_eq!(records[2].entry_time, TimeField::Absent);
        assert_eq!(records[2].dwell_time, 12.5);
    }

    #[test]
    fn test_missing_columns_lists_both_sides() {
        let file = write_csv("global_object_id,zone_id\n1,1\n");

        let err = load_csv(file.path()).unwrap_err().to_string();

        assert!(err.contains("zone_entry_time"));
        assert!(err.contains("zone_exit_time"));
        assert!(err.contains("dwell_time"));
        assert!(err.contains("Available columns: global_object_id, zone_id"));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let file = write_csv(
            "global_object_id,zone_id,zone_entry_time,zone_exit_time,dwell_time,site\n\
             1,1,-1,-1,0.0,store-7\n",
        );

        let records = load_csv(file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_malformed_row_reports_line_number() {
        let file = write_csv(
            "global_object_id,zone_id,zone_entry_time,zone_exit_time,dwell_time\n\
             1,1,-1,-1,0.0\n\
             not_a_number,1,-1,-1,0.0\n",
        );

        let err = format!("{:#}", load_csv(file.path()).unwrap_err());
        assert!(err.contains("line 3"));
    }

    #[test]
    fn test_empty_table_loads_as_zero_records() {
        let file =
            write_csv("global_object_id,zone_id,zone_entry_time,zone_exit_time,dwell_time\n");

        let records = load_csv(file.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_file_fails_with_context() {
        let err = format!("{:#}", load_csv("/nonexistent/gmr.csv").unwrap_err());
        assert!(err.contains("/nonexistent/gmr.csv"));
    }
}
