//! Result log export: CSV and JSON lines

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use scamguard_core::{Error, Label, LogRecord, Result, ResultLog};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

const CSV_HEADER: [&str; 7] = [
    "timestamp",
    "message",
    "predicted_label",
    "confidence",
    "model_id",
    "actual_label",
    "category",
];

/// Flat CSV row; every column is always present so the header is stable
#[derive(Debug, Serialize, Deserialize)]
struct ExportRow {
    timestamp: DateTime<Utc>,
    message: String,
    predicted_label: Label,
    confidence: f64,
    model_id: String,
    actual_label: Option<Label>,
    category: Option<String>,
}

impl From<&LogRecord> for ExportRow {
    fn from(record: &LogRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            message: record.message.clone(),
            predicted_label: record.predicted_label,
            confidence: record.confidence,
            model_id: record.model_id.clone(),
            actual_label: record.actual_label,
            category: record.category.clone(),
        }
    }
}

impl From<ExportRow> for LogRecord {
    fn from(row: ExportRow) -> Self {
        LogRecord {
            timestamp: row.timestamp,
            message: row.message,
            predicted_label: row.predicted_label,
            confidence: row.confidence,
            model_id: row.model_id,
            actual_label: row.actual_label,
            category: row.category.filter(|c| !c.is_empty()),
        }
    }
}

/// Export format, chosen from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    JsonLines,
}

impl ExportFormat {
    /// `.csv` is CSV; `.jsonl`, `.ndjson` and `.json` are JSON lines
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("jsonl") | Some("ndjson") | Some("json") => Ok(Self::JsonLines),
            _ => Err(Error::invalid_argument(format!(
                "unsupported export format for {} (expected .csv or .jsonl)",
                path.display()
            ))),
        }
    }
}

/// Write a log as CSV with a header row
pub fn write_csv<W: Write>(log: &ResultLog, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    if log.is_empty() {
        writer
            .write_record(CSV_HEADER)
            .map_err(std::io::Error::from)?;
    }

    for record in log {
        writer
            .serialize(ExportRow::from(record))
            .map_err(std::io::Error::from)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a log written by [`write_csv`]
pub fn read_csv<R: Read>(reader: R) -> Result<ResultLog> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    reader
        .deserialize::<ExportRow>()
        .map(|row| {
            row.map(LogRecord::from)
                .map_err(|e| Error::from(std::io::Error::from(e)))
        })
        .collect()
}

/// Serialize a log as JSON lines
pub fn to_json_lines(log: &ResultLog) -> Result<String> {
    let mut out = String::new();
    for record in log {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

pub fn write_json_lines<W: Write>(log: &ResultLog, mut writer: W) -> Result<()> {
    for record in log {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a JSON lines log, skipping blank lines
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<ResultLog> {
    let mut log = ResultLog::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        log.append(serde_json::from_str(&line)?);
    }
    Ok(log)
}

/// Write a log to `path`, format chosen by extension
pub fn export_to_path(log: &ResultLog, path: &Path) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    let writer = BufWriter::new(File::create(path)?);

    match format {
        ExportFormat::Csv => write_csv(log, writer)?,
        ExportFormat::JsonLines => write_json_lines(log, writer)?,
    }

    info!(path = %path.display(), records = log.len(), "Exported result log");
    Ok(())
}

/// Load a previously exported log, format chosen by extension
pub fn import_from_path(path: &Path) -> Result<ResultLog> {
    let format = ExportFormat::from_path(path)?;
    let reader = BufReader::new(File::open(path)?);

    match format {
        ExportFormat::Csv => read_csv(reader),
        ExportFormat::JsonLines => read_json_lines(reader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamguard_core::ClassificationResult;

    fn sample_log() -> ResultLog {
        vec![
            LogRecord::from_result(
                "WIN, money",
                &ClassificationResult::new(Label::Scam, 90.0, "keyword"),
            )
            .with_actual(Label::Scam),
            LogRecord::from_result(
                "meeting at 2pm",
                &ClassificationResult::new(Label::Legitimate, 75.5, "keyword"),
            )
            .with_category("Notifications"),
        ]
        .into()
    }

    #[test]
    fn test_csv_header_and_empty_optionals() {
        let mut buf = Vec::new();
        write_csv(&sample_log(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timestamp,message,predicted_label,confidence,model_id,actual_label,category"
        );
        let first = lines.next().unwrap();
        assert!(first.contains("\"WIN, money\",scam,90.0,keyword,scam,"));
        let second = lines.next().unwrap();
        assert!(second.ends_with("legitimate,75.5,keyword,,Notifications"));
    }

    #[test]
    fn test_csv_reads_back() {
        let log = sample_log();
        let mut buf = Vec::new();
        write_csv(&log, &mut buf).unwrap();

        let read = read_csv(buf.as_slice()).unwrap();
        assert_eq!(read, log);
    }

    #[test]
    fn test_json_lines_one_record_per_line() {
        let log = sample_log();
        let text = to_json_lines(&log).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.lines().nth(1).unwrap().contains("actual_label"));

        let read = read_json_lines(format!("{}\n", text).as_bytes()).unwrap();
        assert_eq!(read, log);
    }

    #[test]
    fn test_empty_csv_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&ResultLog::new(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.jsonl")).unwrap(),
            ExportFormat::JsonLines
        );
        assert!(ExportFormat::from_path(Path::new("out.xlsx")).is_err());
        assert!(ExportFormat::from_path(Path::new("out")).is_err());
    }
}
