//! Table emission adapters.

mod csv_emitter;

pub use csv_emitter::CsvTableEmitter;
