//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod process_eod_files;

pub use process_eod_files::{PipelineSettings, ProcessEodFilesUseCase};
