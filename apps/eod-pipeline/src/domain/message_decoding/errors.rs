//! Message decoding errors.

use thiserror::Error;

/// Errors raised while decoding a downloaded file.
///
/// Line numbers are 1-based positions in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffered group members do not fill exactly `12 × count` slots.
    #[error(
        "line {line}: repeating group declares {declared} instance(s), expected {expected} member fields, found {actual}"
    )]
    MalformedGroup {
        /// Source line.
        line: usize,
        /// Declared instance count.
        declared: usize,
        /// Member fields required by the declared count.
        expected: usize,
        /// Member fields actually buffered.
        actual: usize,
    },

    /// Tag is not numeric.
    #[error("line {line}: tag '{tag}' is not numeric")]
    InvalidTag {
        /// Source line.
        line: usize,
        /// Offending tag text.
        tag: String,
    },

    /// Group count value is not a non-negative integer.
    #[error("line {line}: group count '{value}' is not a valid instance count")]
    InvalidGroupCount {
        /// Source line.
        line: usize,
        /// Offending value.
        value: String,
    },

    /// File contained no messages to tabulate.
    #[error("no messages to tabulate")]
    EmptyBatch,

    /// Source could not be read.
    #[error("failed to read source: {0}")]
    Read(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        Self::Read(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_group_message_carries_counts() {
        let err = DecodeError::MalformedGroup {
            line: 3,
            declared: 2,
            expected: 24,
            actual: 23,
        };
        assert_eq!(
            err.to_string(),
            "line 3: repeating group declares 2 instance(s), expected 24 member fields, found 23"
        );
    }

    #[test]
    fn io_error_converts_to_read() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err: DecodeError = io.into();
        assert!(matches!(err, DecodeError::Read(_)));
    }
}
