//! Pipeline Event Sink Port (Driven Port)
//!
//! Interface for publishing progress events of a run to a log or UI.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::file_discovery::FileType;

/// Progress event of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Listing was fetched for a file type.
    ListingFetched {
        /// Type being processed.
        file_type: FileType,
        /// Listing URL.
        url: String,
        /// Number of links found.
        entries: usize,
    },

    /// A listed file matched a type's pattern.
    FileMatched {
        /// Remote file name.
        name: String,
        /// Matched type.
        file_type: FileType,
    },

    /// A file was downloaded.
    DownloadComplete {
        /// Remote file name.
        name: String,
        /// Local path.
        path: PathBuf,
    },

    /// Decoded tables were written.
    TablesWritten {
        /// Remote file name.
        name: String,
        /// Number of decoded messages.
        rows: usize,
        /// Number of columns.
        columns: usize,
        /// Written outputs.
        outputs: Vec<PathBuf>,
    },

    /// A file (or listing) failed.
    FileFailed {
        /// Remote file name, pattern, or listing URL.
        name: String,
        /// Type being processed.
        file_type: FileType,
        /// Rendered error.
        error: String,
    },
}

/// Port for receiving pipeline events.
///
/// Publishing is fire-and-forget; a sink must not fail the run.
pub trait PipelineEventSink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: PipelineEvent);
}

/// No-op event sink for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventSink;

impl PipelineEventSink for NoOpEventSink {
    fn publish(&self, _event: PipelineEvent) {}
}
