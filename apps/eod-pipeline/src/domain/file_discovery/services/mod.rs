//! File discovery domain services.

mod pattern_matcher;

pub use pattern_matcher::{Classification, FilePatternMatcher, compact_date};
