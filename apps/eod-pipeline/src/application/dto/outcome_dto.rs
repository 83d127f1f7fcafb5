//! Run outcome DTOs

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::file_discovery::FileType;
use crate::error::{ErrorKind, PipelineError};

/// Final status of one file (or of a file type with nothing to process).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    /// Downloaded, and decoded where applicable.
    Ok,
    /// No listed file matched the type's pattern.
    NoMatch,
    /// Listing or download failed.
    FetchFailed,
    /// Decoding or table emission failed.
    DecodeFailed,
    /// Pattern configuration is defective.
    Misconfigured,
}

impl FileStatus {
    /// Whether the status should fail the run.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed | Self::DecodeFailed | Self::Misconfigured
        )
    }

    /// Status an error maps to.
    #[must_use]
    pub const fn for_error(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::FetchFailed | ErrorKind::DownloadFailed => Self::FetchFailed,
            ErrorKind::DecodeFailed | ErrorKind::WriteFailed | ErrorKind::InternalError => {
                Self::DecodeFailed
            }
            ErrorKind::NoMatch => Self::NoMatch,
            ErrorKind::AmbiguousPattern | ErrorKind::InvalidPattern => Self::Misconfigured,
        }
    }
}

/// Outcome of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// Remote file name; the pattern for `no-match`, the listing URL for a
    /// failed listing.
    pub name: String,
    /// File type processed.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Final status.
    pub status: FileStatus,
    /// Local paths produced.
    pub outputs: Vec<PathBuf>,
    /// Failure, if any.
    pub error: Option<PipelineError>,
}

impl FileOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn ok(name: impl Into<String>, file_type: FileType, outputs: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file_type,
            status: FileStatus::Ok,
            outputs,
            error: None,
        }
    }

    /// Failed outcome; the status follows the error kind.
    #[must_use]
    pub fn failed(name: impl Into<String>, file_type: FileType, error: PipelineError) -> Self {
        Self {
            name: name.into(),
            file_type,
            status: FileStatus::for_error(error.kind()),
            outputs: Vec::new(),
            error: Some(error),
        }
    }

    /// Failed outcome that keeps already-produced outputs (e.g. the download).
    #[must_use]
    pub fn failed_with_outputs(
        name: impl Into<String>,
        file_type: FileType,
        outputs: Vec<PathBuf>,
        error: PipelineError,
    ) -> Self {
        Self {
            outputs,
            ..Self::failed(name, file_type, error)
        }
    }
}

/// All outcomes of one run, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Trade date the run processed.
    pub trade_date: NaiveDate,
    /// Per-file outcomes.
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    /// Whether any outcome should fail the run.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.status.is_failure())
    }

    /// Outcomes of one file type.
    pub fn for_type(&self, file_type: FileType) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(move |o| o.file_type == file_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message_decoding::DecodeError;

    #[test]
    fn status_follows_error_kind() {
        let outcome = FileOutcome::failed("x.csv", FileType::Price, DecodeError::EmptyBatch.into());
        assert_eq!(outcome.status, FileStatus::DecodeFailed);
        assert!(outcome.outputs.is_empty());
    }

    #[test]
    fn no_match_is_not_a_failure() {
        assert!(!FileStatus::NoMatch.is_failure());
        assert!(!FileStatus::Ok.is_failure());
        assert!(FileStatus::Misconfigured.is_failure());
    }

    #[test]
    fn serializes_as_json_line() {
        let outcome = FileOutcome::ok(
            "PRICE_GFOX_PRD_20240131.csv",
            FileType::Price,
            vec![PathBuf::from("eod/20240131/PRICE_GFOX_PRD_20240131_DUCO.csv")],
        );
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["type"], "PRICE");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["error"], serde_json::Value::Null);
        assert_eq!(
            json["outputs"][0],
            "eod/20240131/PRICE_GFOX_PRD_20240131_DUCO.csv"
        );
    }

    #[test]
    fn report_failure_detection() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut report = RunReport {
            trade_date: date,
            outcomes: vec![FileOutcome::ok("a.csv", FileType::Instruments, vec![])],
        };
        assert!(!report.has_failures());

        report.outcomes.push(FileOutcome::failed(
            "b.csv",
            FileType::Price,
            DecodeError::EmptyBatch.into(),
        ));
        assert!(report.has_failures());
        assert_eq!(report.for_type(FileType::Price).count(), 1);
    }
}
