//! Unified error reporting for the EOD pipeline.
//!
//! Every per-file failure is converted into a [`PipelineError`] at the file
//! boundary so it can be attached to the file's outcome.
//!
//! # Error Kinds
//!
//! | Kind | Outcome status | Source |
//! |------|----------------|--------|
//! | `FETCH_FAILED` | `fetch-failed` | listing request |
//! | `DOWNLOAD_FAILED` | `fetch-failed` | file download |
//! | `DECODE_FAILED` | `decode-failed` | trade/price decoding |
//! | `WRITE_FAILED` | `decode-failed` | table emission |
//! | `NO_MATCH` | `no-match` | pattern filtering |
//! | `AMBIGUOUS_PATTERN` | `misconfigured` | pattern filtering |
//! | `INVALID_PATTERN` | `misconfigured` | pattern compilation |
//! | `INTERNAL_ERROR` | `decode-failed` | worker task join |

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::application::ports::{DownloadError, FetchError, TableError};
use crate::domain::file_discovery::{NoMatchError, PatternAmbiguityError, PatternError};
use crate::domain::message_decoding::DecodeError;

/// Kind of a pipeline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Listing could not be fetched.
    FetchFailed,
    /// File could not be downloaded.
    DownloadFailed,
    /// File content could not be decoded.
    DecodeFailed,
    /// Decoded table could not be written.
    WriteFailed,
    /// No listed file matched a pattern.
    NoMatch,
    /// A file matched several patterns.
    AmbiguousPattern,
    /// A pattern template is invalid.
    InvalidPattern,
    /// Worker task failed.
    InternalError,
}

impl ErrorKind {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::FetchFailed => "FETCH_FAILED",
            Self::DownloadFailed => "DOWNLOAD_FAILED",
            Self::DecodeFailed => "DECODE_FAILED",
            Self::WriteFailed => "WRITE_FAILED",
            Self::NoMatch => "NO_MATCH",
            Self::AmbiguousPattern => "AMBIGUOUS_PATTERN",
            Self::InvalidPattern => "INVALID_PATTERN",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Any error that can end the processing of one file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Listing fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// File download failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Writing the decoded tables failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// No listed file matched.
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),

    /// A file matched more than one pattern.
    #[error(transparent)]
    Ambiguous(#[from] PatternAmbiguityError),

    /// Pattern table is invalid.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A blocking worker panicked or was aborted.
    #[error("worker for {name} failed: {message}")]
    Task {
        /// File the worker was processing.
        name: String,
        /// Join error.
        message: String,
    },
}

impl PipelineError {
    /// Get the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(_) => ErrorKind::FetchFailed,
            Self::Download(_) => ErrorKind::DownloadFailed,
            Self::Decode(_) => ErrorKind::DecodeFailed,
            Self::Table(_) => ErrorKind::WriteFailed,
            Self::NoMatch(_) => ErrorKind::NoMatch,
            Self::Ambiguous(_) => ErrorKind::AmbiguousPattern,
            Self::Pattern(_) => ErrorKind::InvalidPattern,
            Self::Task { .. } => ErrorKind::InternalError,
        }
    }
}

impl Serialize for PipelineError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PipelineError", 2)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::file_discovery::FileType;

    #[test]
    fn kind_follows_source() {
        let err: PipelineError = DecodeError::EmptyBatch.into();
        assert_eq!(err.kind(), ErrorKind::DecodeFailed);

        let err: PipelineError = NoMatchError {
            file_type: FileType::Price,
            pattern: "PRICE_GFOX_PRD_20240131\\.csv".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NoMatch);
    }

    #[test]
    fn message_is_transparent() {
        let source = FetchError::Timeout {
            url: "http://eod.local/".to_string(),
        };
        let err = PipelineError::from(source.clone());
        assert_eq!(err.to_string(), source.to_string());
    }

    #[test]
    fn serializes_kind_and_message() {
        let err = PipelineError::Task {
            name: "x.dat".to_string(),
            message: "panicked".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "INTERNAL_ERROR");
        assert_eq!(json["message"], "worker for x.dat failed: panicked");
    }

    #[test]
    fn reason_matches_serde_name() {
        for kind in [ErrorKind::FetchFailed, ErrorKind::AmbiguousPattern] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.reason());
        }
    }
}
