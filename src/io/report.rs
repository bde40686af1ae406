//! Report egress - appends analysis sections to a JSONL file
//!
//! One JSON object per line, one line per report section. All lines from a
//! single invocation share a UUIDv7 run id so multi-run files stay
//! separable.

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Unified schema for report lines
#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    /// UUIDv7 run id (time-sortable)
    run: &'a str,
    /// Write timestamp (ISO 8601)
    ts: &'a str,
    /// Dataset label, for filtering multi-dataset report files
    dataset: &'a str,
    /// Section name, e.g. "conversion"
    section: &'a str,
    /// Section payload: rows or a scalar summary
    data: serde_json::Value,
}

/// Appends report sections to the configured JSONL file
pub struct ReportWriter {
    writer: BufWriter<File>,
    file_path: PathBuf,
    run_id: String,
    dataset: String,
    sections: usize,
}

impl ReportWriter {
    /// Open the report file for appending, creating parent directories
    pub fn create(path: impl AsRef<Path>, dataset: impl Into<String>) -> anyhow::Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let dataset = dataset.into();

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create report directory {}", parent.display())
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open report file {}", file_path.display()))?;

        let run_id = Uuid::now_v7().to_string();

        info!(
            file_path = %file_path.display(),
            run_id = %run_id,
            dataset = %dataset,
            "report_writer_initialized"
        );

        Ok(Self { writer: BufWriter::new(file), file_path, run_id, dataset, sections: 0 })
    }

    /// Run id shared by every line this writer produces
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Append one section line
    pub fn write_section<T: Serialize>(&mut self, section: &str, data: &T) -> anyhow::Result<()> {
        let ts = Utc::now().to_rfc3339();
        let record = ReportRecord {
            run: &self.run_id,
            ts: &ts,
            dataset: &self.dataset,
            section,
            data: serde_json::to_value(data)
                .with_context(|| format!("Failed to serialize section {}", section))?,
        };

        let line = serde_json::to_string(&record)
            .with_context(|| format!("Failed to serialize section {}", section))?;
        writeln!(self.writer, "{}", line)
            .with_context(|| format!("Failed to write to {}", self.file_path.display()))?;

        debug!(section = %section, bytes = line.len(), "report_section_written");
        self.sections += 1;

        Ok(())
    }

    /// Flush and log the final section count
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.file_path.display()))?;

        info!(
            file_path = %self.file_path.display(),
            sections = self.sections,
            "report_written"
        );

        Ok(())
    }
}
