use crate::convert::SourceEncoding;
use crate::writer::WriteProgress;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Converted,
    /// Decoding failed; an empty file was written in its place.
    DecodeFailed,
    WriteFailed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub bytes_written: u64,
    pub status: FileStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub encoding: SourceEncoding,
    pub extensions: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub files: Vec<FileReport>,
    pub walk_errors: Vec<String>,
}

impl ConversionReport {
    /// Combine per-file decode errors (same order as the written files) with
    /// the writer's outcomes.
    pub fn from_outcomes(
        header: ReportHeader,
        decode_errors: Vec<Option<String>>,
        progress: &WriteProgress,
        walk_errors: Vec<String>,
    ) -> Self {
        let files = progress
            .outcomes
            .iter()
            .zip(decode_errors)
            .map(|(outcome, decode_error)| {
                let (status, error) = match (&outcome.error, decode_error) {
                    (Some(write_error), _) => (FileStatus::WriteFailed, Some(write_error.clone())),
                    (None, Some(decode_error)) => (FileStatus::DecodeFailed, Some(decode_error)),
                    (None, None) => (FileStatus::Converted, None),
                };

                FileReport {
                    source: outcome.source.clone(),
                    output: outcome.destination.clone(),
                    bytes_written: outcome.bytes_written,
                    status,
                    error,
                }
            })
            .collect();

        Self {
            source_root: header.source_root,
            output_root: header.output_root,
            encoding: header.encoding,
            extensions: header.extensions,
            started_at: header.started_at,
            duration: header.duration,
            files,
            walk_errors,
        }
    }

    pub fn converted_count(&self) -> usize {
        self.count(FileStatus::Converted)
    }

    pub fn failed_count(&self) -> usize {
        self.files.len() - self.converted_count()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes_written).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0 && self.walk_errors.is_empty()
    }

    /// Walk errors first, then per-file failures.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = self.walk_errors.clone();
        for file in &self.files {
            if let Some(ref error) = file.error {
                errors.push(format!("{}: {}", file.source.display(), error));
            }
        }
        errors
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}

/// Run-level fields of a [`ConversionReport`].
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub encoding: SourceEncoding,
    pub extensions: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WriteOutcome;

    fn header() -> ReportHeader {
        ReportHeader {
            source_root: PathBuf::from("/src"),
            output_root: PathBuf::from("/out"),
            encoding: SourceEncoding::Gbk,
            extensions: vec!["js".to_string()],
            started_at: Utc::now(),
            duration: Duration::from_millis(5),
        }
    }

    fn outcome(name: &str, bytes: u64, error: Option<&str>) -> WriteOutcome {
        WriteOutcome {
            source: PathBuf::from("/src").join(name),
            destination: PathBuf::from("/out").join(name),
            bytes_written: bytes,
            error: error.map(|e| e.to_string()),
        }
    }

    #[test]
    fn test_report_statuses() {
        let mut progress = WriteProgress::new(3);
        progress.outcomes = vec![
            outcome("a.js", 10, None),
            outcome("b.js", 0, None),
            outcome("c.js", 0, Some("disk full")),
        ];

        let report = ConversionReport::from_outcomes(
            header(),
            vec![None, Some("not valid gbk".to_string()), None],
            &progress,
            vec!["Permission denied: /src/locked".to_string()],
        );

        assert_eq!(report.files[0].status, FileStatus::Converted);
        assert_eq!(report.files[1].status, FileStatus::DecodeFailed);
        assert_eq!(report.files[2].status, FileStatus::WriteFailed);
        assert_eq!(report.converted_count(), 1);
        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.total_bytes(), 10);
        assert!(!report.is_clean());

        let errors = report.errors();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Permission denied"));
        assert!(errors[1].contains("not valid gbk"));
    }

    #[test]
    fn test_report_serializes() {
        let mut progress = WriteProgress::new(1);
        progress.outcomes = vec![outcome("a.js", 8, None)];

        let report = ConversionReport::from_outcomes(header(), vec![None], &progress, Vec::new());
        assert!(report.is_clean());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["encoding"], "gbk");
        assert_eq!(json["files"][0]["status"], "converted");
        assert_eq!(json["files"][0]["output"], "/out/a.js");
    }
}
