//! Event sink that logs pipeline events through `tracing`.

use crate::application::ports::{PipelineEvent, PipelineEventSink};

/// Logs each event with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl PipelineEventSink for TracingEventSink {
    fn publish(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::ListingFetched {
                file_type,
                url,
                entries,
            } => {
                tracing::info!(%file_type, %url, entries, "Listing fetched");
            }
            PipelineEvent::FileMatched { name, file_type } => {
                tracing::info!(%name, %file_type, "File matched");
            }
            PipelineEvent::DownloadComplete { name, path } => {
                tracing::info!(%name, path = %path.display(), "Download complete");
            }
            PipelineEvent::TablesWritten {
                name,
                rows,
                columns,
                outputs,
            } => {
                tracing::info!(%name, rows, columns, outputs = outputs.len(), "Tables written");
            }
            PipelineEvent::FileFailed {
                name,
                file_type,
                error,
            } => {
                tracing::error!(%name, %file_type, %error, "File failed");
            }
        }
    }
}
