//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! The orchestrator depends only on these traits; adapters live in
//! [`crate::infrastructure`].

mod event_sink_port;
mod remote_source_port;
mod table_sink_port;

pub use event_sink_port::{NoOpEventSink, PipelineEvent, PipelineEventSink};
pub use remote_source_port::{DownloadError, FetchError, RemoteSourcePort};
pub use table_sink_port::{TableError, TableSinkPort};
