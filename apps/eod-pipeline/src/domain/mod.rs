//! Domain Layer
//!
//! The innermost layer containing business logic with zero I/O.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless classification and decoding logic
//!
//! # Bounded Contexts
//!
//! - [`file_discovery`]: Date-parameterized classification of listed EOD files
//! - [`message_decoding`]: Tag/value decoding, repeating groups, column order

pub mod file_discovery;
pub mod message_decoding;
