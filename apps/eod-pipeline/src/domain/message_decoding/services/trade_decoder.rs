//! Trade message decoder.
//!
//! Trade lines carry a repeating parties group introduced by tag 552
//! (NoSides). Member tags that follow a positive count are buffered and
//! expanded into per-instance keys (`552_<i>_<tag>`) once the whole line has
//! been read, so the expansion lands after the top-level tags regardless of
//! where the members appeared on the wire.

use crate::domain::message_decoding::errors::DecodeError;
use crate::domain::message_decoding::value_objects::{
    DecodedMessage, FIELD_DELIMITER, FieldKey, GROUP_COUNT_TAG, GROUP_MEMBER_TAGS, MESSAGE_START,
    TRADE_OPTIONAL_TAGS, is_group_member,
};

/// Decodes trade lines into [`DecodedMessage`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeMessageDecoder;

impl TradeMessageDecoder {
    /// Decode one line.
    ///
    /// Returns `Ok(None)` when the line does not start with the message-start
    /// marker. `line_no` is only used for error reporting.
    pub fn decode_line(&self, line: &str, line_no: usize) -> Result<Option<DecodedMessage>, DecodeError> {
        if !line.starts_with(MESSAGE_START) {
            return Ok(None);
        }

        let mut message = DecodedMessage::new();
        let mut declared: Option<usize> = None;
        let mut group_fields: Vec<(u32, String)> = Vec::new();

        for token in line.trim().split(FIELD_DELIMITER) {
            let Some((tag, value)) = token.split_once('=') else {
                continue;
            };
            let tag_number: u32 = tag.parse().map_err(|_| DecodeError::InvalidTag {
                line: line_no,
                tag: tag.to_string(),
            })?;

            if tag_number == GROUP_COUNT_TAG {
                let count = value.parse().map_err(|_| DecodeError::InvalidGroupCount {
                    line: line_no,
                    value: value.to_string(),
                })?;
                declared = Some(count);
                message.insert(FieldKey::number(tag_number), value);
            } else if is_group_member(tag_number) {
                // Members outside a declared group are not top-level fields.
                if declared.is_some_and(|n| n > 0) {
                    group_fields.push((tag_number, value.to_string()));
                }
            } else {
                message.insert(FieldKey::number(tag_number), value);
            }
        }

        let Some(count) = declared else {
            return Ok(Some(message));
        };

        // Counts too large to multiply out can never be satisfied.
        let expected = count.checked_mul(GROUP_MEMBER_TAGS.len());
        if expected != Some(group_fields.len()) {
            return Err(DecodeError::MalformedGroup {
                line: line_no,
                declared: count,
                expected: expected.unwrap_or(usize::MAX),
                actual: group_fields.len(),
            });
        }

        for (index, instance) in group_fields.chunks(GROUP_MEMBER_TAGS.len()).enumerate() {
            for (member, (_, value)) in GROUP_MEMBER_TAGS.iter().zip(instance) {
                message.insert(FieldKey::group(index + 1, *member), value.as_str());
            }
        }

        for tag in TRADE_OPTIONAL_TAGS {
            message.insert_default(FieldKey::number(tag), "");
        }

        Ok(Some(message))
    }
}
