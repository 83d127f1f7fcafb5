//! CSV table emitter.

use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};

use crate::application::ports::{TableError, TableSinkPort};
use crate::domain::message_decoding::Batch;

/// Writes batches as CSV: the column order as header, one row per message.
///
/// The table is rendered once in memory and the same bytes are written to
/// every output, so repeated runs over the same input are byte-identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableEmitter;

impl CsvTableEmitter {
    /// Create a new emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render a batch to CSV bytes.
    pub fn render(&self, batch: &Batch) -> Result<Vec<u8>, TableError> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(batch.columns().header())
            .map_err(render_error)?;
        for row in batch.rows() {
            writer.write_record(&row).map_err(render_error)?;
        }

        writer.into_inner().map_err(|e| TableError::Render {
            message: e.to_string(),
        })
    }
}

impl TableSinkPort for CsvTableEmitter {
    fn write_tables(&self, batch: &Batch, outputs: &[PathBuf]) -> Result<Vec<PathBuf>, TableError> {
        let rendered = self.render(batch)?;

        for output in outputs {
            write_output(output, &rendered)?;
            tracing::debug!(
                path = %output.display(),
                rows = batch.len(),
                columns = batch.columns().len(),
                "Wrote table"
            );
        }

        Ok(outputs.to_vec())
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), TableError> {
    std::fs::write(path, bytes).map_err(|e| TableError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn render_error(err: csv::Error) -> TableError {
    TableError::Render {
        message: err.to_string(),
    }
}
