//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for the orchestrator's outputs.

mod outcome_dto;

pub use outcome_dto::{FileOutcome, FileStatus, RunReport};
