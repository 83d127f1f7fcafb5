// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! EOD Pipeline - Rust Core Library
//!
//! End-of-day file pipeline: discovers the counterparty's files for a trade
//! date on an HTTP directory listing, downloads them, decodes SOH-delimited
//! tag/value trade and price messages, and writes column-normalized CSV.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core logic with zero I/O
//!   - `file_discovery`: File types, date-parameterized name patterns
//!   - `message_decoding`: Tag/value decoding, repeating groups, column order
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`RemoteSourcePort`, `TableSinkPort`)
//!   - `use_cases`: `ProcessEodFiles`
//!   - `dto`: Per-file outcomes and run reports
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `remote`: HTTP listing and download
//!   - `table`: CSV emission
//!   - `events`: Event logging

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Unified pipeline errors.
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::dto::{FileOutcome, FileStatus, RunReport};
pub use application::use_cases::{PipelineSettings, ProcessEodFilesUseCase};
pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use domain::file_discovery::{FileType, RemoteFile};
pub use domain::message_decoding::{Batch, DecodeError};
pub use error::{ErrorKind, PipelineError};
pub use infrastructure::{CsvTableEmitter, HttpRemoteSource, TracingEventSink};
