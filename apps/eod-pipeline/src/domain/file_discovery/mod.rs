//! File Discovery Bounded Context
//!
//! Classifies names found on the remote end-of-day index into file types
//! using date-parameterized patterns.
//!
//! # Key Concepts
//!
//! - **FileType**: closed set of EOD deliverables (trades, prices, instruments)
//! - **RemoteFile**: a listed name paired with its classified type
//! - **FilePatternMatcher**: per-date pattern table; overlapping matches are
//!   surfaced as [`PatternAmbiguityError`]

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{NoMatchError, PatternAmbiguityError, PatternError};
pub use services::{Classification, FilePatternMatcher, compact_date};
pub use value_objects::{FileType, RemoteFile, UnknownFileType};
