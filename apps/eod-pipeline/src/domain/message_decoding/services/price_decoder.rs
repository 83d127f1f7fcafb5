//! Price message decoder.

use crate::domain::message_decoding::value_objects::{DecodedMessage, FIELD_DELIMITER, FieldKey};

/// Decodes price lines: flat `tag=value` tokens, no repeating groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceMessageDecoder;

impl PriceMessageDecoder {
    /// Decode one line. Blank lines yield `None`.
    #[must_use]
    pub fn decode_line(&self, line: &str) -> Option<DecodedMessage> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut message = DecodedMessage::new();
        for token in line.split(FIELD_DELIMITER) {
            if let Some((tag, value)) = token.split_once('=') {
                message.insert(FieldKey::tag(tag), value);
            }
        }
        Some(message)
    }
}
