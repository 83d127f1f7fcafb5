//! Table Sink Port (Driven Port)
//!
//! Interface for persisting a decoded batch as one or more tables.

use std::path::PathBuf;

use crate::domain::message_decoding::Batch;

/// Table could not be rendered or written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Rendering the table failed.
    #[error("failed to render table: {message}")]
    Render {
        /// Encoder message.
        message: String,
    },

    /// Writing an output failed.
    #[error("failed to write {path}: {message}")]
    Write {
        /// Output path.
        path: String,
        /// I/O error.
        message: String,
    },
}

/// Port for writing rendered tables.
///
/// Implementations must render the batch once and write the identical bytes
/// to every output.
pub trait TableSinkPort: Send + Sync {
    /// Write the batch to each output path, returning the written paths.
    fn write_tables(&self, batch: &Batch, outputs: &[PathBuf]) -> Result<Vec<PathBuf>, TableError>;
}
