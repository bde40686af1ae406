//! GMR Analysis - entrance conversion and customer flow reports
//!
//! Loads a Global Movement Records CSV, runs the analysis calculators and
//! renders the results as text tables on stdout plus a JSONL report file.
//!
//! Usage:
//!   gmr-analysis data/gmr.csv
//!   gmr-analysis data/gmr.csv --report reports/today.jsonl --histogram-max 30
//!
//! Module structure:
//! - `domain/` - Core data types (MovementRecord, ids, buckets)
//! - `analysis/` - Pure calculators, one per report section
//! - `io/` - CSV ingestion and JSONL report egress
//! - `infra/` - Configuration

use clap::Parser;
use gmr_analysis::analysis::{
    conversion_counts, enter_exit_analysis, group_size_histogram, missing_entrance_share,
    records_distribution, summary_statistics, zone_frequency,
};
use gmr_analysis::domain::MovementRecord;
use gmr_analysis::infra::Config;
use gmr_analysis::io::{load_csv, ReportWriter};
use std::path::Path;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// GMR Analysis - entrance conversion and customer flow reports
#[derive(Parser, Debug)]
#[command(name = "gmr-analysis", version, about, long_about = None)]
struct Args {
    /// Path to the GMR CSV file
    ///
    /// Must carry the columns global_object_id, zone_id, zone_entry_time,
    /// zone_exit_time and dwell_time.
    input: String,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/gmr.toml")]
    config: String,

    /// JSONL report file (overrides the configured path)
    #[arg(short, long)]
    report: Option<String>,

    /// Upper bound for exact histogram bins (overrides the configured value)
    #[arg(long)]
    histogram_max: Option<u64>,

    /// Skip writing the JSONL report file
    #[arg(long)]
    no_report: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        "gmr_analysis_starting"
    );

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    let report_file =
        args.report.clone().unwrap_or_else(|| config.report_file().to_string());
    let histogram_max = args.histogram_max.unwrap_or_else(|| config.histogram_max());
    let dataset = dataset_label(&config, &args.input);

    info!(
        config_file = %config.config_file(),
        input = %args.input,
        report_file = %report_file,
        histogram_max = histogram_max,
        dataset = %dataset,
        "config_loaded"
    );

    let records = load_csv(&args.input)?;

    println!("Loaded {} records from {}", records.len(), args.input);

    render_report(&records, config.preview_rows(), histogram_max);

    if !args.no_report {
        let mut writer = ReportWriter::create(&report_file, &dataset)?;
        write_report(&mut writer, &records, histogram_max)?;
        writer.finish()?;
        println!("\nReport appended to {}", report_file);
    }

    Ok(())
}

/// Report record label: configured override, else the input file stem
fn dataset_label(config: &Config, input: &str) -> String {
    if let Some(label) = config.dataset_label() {
        return label.to_string();
    }
    Path::new(input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("gmr")
        .to_string()
}

/// Format a distribution moment, which may be NaN on tiny datasets
fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Render all analysis sections as text tables
fn render_report(records: &[MovementRecord], preview_rows: usize, histogram_max: u64) {
    let stats = summary_statistics(records);

    println!("\nSummary Statistics");
    println!("------------------");
    println!("  Total Records:     {}", stats.total_records);
    println!("  Unique Objects:    {}", stats.unique_objects);
    println!("  Unique Zones:      {}", stats.unique_zones);
    println!("  Entrance Enters:   {}", stats.unique_entrance_enters);
    match stats.date_range {
        Some((min, max)) => println!(
            "  Date Range:        {} to {}",
            min.format("%Y-%m-%d %H:%M:%S"),
            max.format("%Y-%m-%d %H:%M:%S")
        ),
        None => println!("  Date Range:        N/A"),
    }

    if preview_rows > 0 && !records.is_empty() {
        println!("\nData Preview (first {} rows)", preview_rows.min(records.len()));
        println!("{:<16} {:<8} {:<22} {:<22} {:<10}", "Object", "Zone", "Entry", "Exit", "Dwell");
        for record in records.iter().take(preview_rows) {
            println!(
                "{:<16} {:<8} {:<22} {:<22} {:<10}",
                record.object_id.to_string(),
                record.zone_id.to_string(),
                record.entry_time.to_string(),
                record.exit_time.to_string(),
                record.dwell_time
            );
        }
    }

    println!("\n1. Conversion from Entrance (Zone 1) to Other Zones");
    let conversions = conversion_counts(records);
    if conversions.is_empty() {
        println!("  No conversion data available.");
    } else {
        println!("{:<10} {:>24}", "Zone ID", "Unique Conversion Count");
        for row in &conversions {
            println!("{:<10} {:>24}", row.zone_id.to_string(), row.conversion_count);
        }
    }

    println!("\n2. Number of Zones Visited (entrance visitors)");
    println!("{:<16} {:>10}", "Number of Zones", "Count");
    for row in &zone_frequency(records) {
        println!("{:<16} {:>10}", row.label, row.count);
    }

    println!("\n3. Objects Missing the Entrance Zone");
    let missing = missing_entrance_share(records);
    println!(
        "  {} of {} objects never visited Zone 1 ({:.2}%)",
        missing.missing_count, missing.total_count, missing.percentage
    );

    println!("\n4. Records per Object Distribution");
    let (shares, size_stats) = records_distribution(records);
    println!("{:<18} {:>18} {:>12}", "Records per Object", "Number of Objects", "Percentage");
    for row in &shares {
        println!(
            "{:<18} {:>18} {:>11.2}%",
            row.bucket.to_string(),
            row.objects,
            row.percentage
        );
    }
    println!(
        "  mean {} | median {} | min {} | max {} | std {}",
        fmt_stat(size_stats.mean),
        fmt_stat(size_stats.median),
        size_stats.min,
        size_stats.max,
        fmt_stat(size_stats.std_dev)
    );

    println!("\n5. Enter/Exit Status by Record Count Category");
    let (exit_rows, exit_summary) = enter_exit_analysis(records);
    println!(
        "  {} of {} records have a captured exit ({:.2}%)",
        exit_summary.with_exit, exit_summary.total_records, exit_summary.exit_percentage
    );
    if !exit_rows.is_empty() {
        println!(
            "{:<18} {:>14} {:>10} {:>13} {:>8}",
            "Records per Object", "Total Records", "With Exit", "Without Exit", "Exit %"
        );
        for row in &exit_rows {
            println!(
                "{:<18} {:>14} {:>10} {:>13} {:>7.2}%",
                row.bucket.to_string(),
                row.total_records,
                row.with_exit,
                row.without_exit,
                row.exit_percentage
            );
        }
    }

    println!("\n6. Records per Object Histogram (up to {})", histogram_max);
    let histogram = group_size_histogram(records, histogram_max);
    if histogram.is_empty() {
        println!("  No objects in dataset.");
    } else {
        println!("{:<10} {:>10}", "Records", "Frequency");
        for row in &histogram {
            println!("{:<10} {:>10}", row.records.to_string(), row.frequency);
        }
    }
}

/// Write all analysis sections to the JSONL report
fn write_report(
    writer: &mut ReportWriter,
    records: &[MovementRecord],
    histogram_max: u64,
) -> anyhow::Result<()> {
    writer.write_section("summary", &summary_statistics(records))?;
    writer.write_section("conversion", &conversion_counts(records))?;
    writer.write_section("zone_frequency", &zone_frequency(records))?;
    writer.write_section("missing_entrance", &missing_entrance_share(records))?;

    let (shares, size_stats) = records_distribution(records);
    writer.write_section("records_distribution", &shares)?;
    writer.write_section("group_size_stats", &size_stats)?;

    let (exit_rows, exit_summary) = enter_exit_analysis(records);
    writer.write_section("enter_exit", &exit_rows)?;
    writer.write_section("exit_summary", &exit_summary)?;

    writer.write_section("histogram", &group_size_histogram(records, histogram_max))?;

    Ok(())
}
