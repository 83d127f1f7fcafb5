//! Field keys and the well-known tags of the EOD wire format.

use std::fmt;

/// Delimiter between `tag=value` tokens.
pub const FIELD_DELIMITER: char = '\x01';

/// Prefix every trade message line starts with (BeginString).
pub const MESSAGE_START: &str = "8=";

/// Tag declaring the number of repeating-group instances.
pub const GROUP_COUNT_TAG: u32 = 552;

/// Member tags of one repeating-group instance, in wire order.
pub const GROUP_MEMBER_TAGS: [u32; 12] = [54, 453, 448, 447, 452, 581, 576, 577, 77, 58, 37, 11];

/// Tags defaulted to empty on trade messages that declare a group count.
pub const TRADE_OPTIONAL_TAGS: [u32; 2] = [201, 202];

/// Trailer tags always placed last in trade tables.
pub const TRAILER_TAGS: [u32; 4] = [570, 571, 828, 10];

/// Tags every price table carries, defaulted to empty when absent.
pub const PRICE_MANDATORY_TAGS: [&str; 3] = ["201", "202", "527"];

/// Key of a decoded field.
///
/// Plain tags keep their textual form. Repeating-group members are
/// synthesized per instance and render as `552_<instance>_<member>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// Top-level tag.
    Tag(String),
    /// Member of a repeating-group instance.
    Group {
        /// 1-based instance index.
        instance: usize,
        /// Member tag.
        member: u32,
    },
}

impl FieldKey {
    /// Key for a top-level tag.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Key for a numeric top-level tag.
    #[must_use]
    pub fn number(tag: u32) -> Self {
        Self::Tag(tag.to_string())
    }

    /// Key for a repeating-group member.
    #[must_use]
    pub const fn group(instance: usize, member: u32) -> Self {
        Self::Group { instance, member }
    }

    /// Whether this key belongs to a repeating-group instance.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    /// Sort key placing group members by instance, then by wire member order.
    ///
    /// Returns `None` for top-level tags.
    #[must_use]
    pub fn group_position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Tag(_) => None,
            Self::Group { instance, member } => {
                let slot = GROUP_MEMBER_TAGS
                    .iter()
                    .position(|m| m == member)
                    .unwrap_or(GROUP_MEMBER_TAGS.len());
                Some((*instance, slot))
            }
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => f.write_str(tag),
            Self::Group { instance, member } => {
                write!(f, "{GROUP_COUNT_TAG}_{instance}_{member}")
            }
        }
    }
}

/// Whether a numeric tag is one of the repeating-group members.
#[must_use]
pub fn is_group_member(tag: u32) -> bool {
    GROUP_MEMBER_TAGS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_renders_with_count_tag() {
        assert_eq!(FieldKey::group(2, 448).to_string(), "552_2_448");
    }

    #[test]
    fn tag_key_renders_verbatim() {
        assert_eq!(FieldKey::tag("35").to_string(), "35");
        assert_eq!(FieldKey::number(527).to_string(), "527");
    }

    #[test]
    fn group_position_follows_member_order() {
        assert_eq!(FieldKey::group(1, 54).group_position(), Some((1, 0)));
        assert_eq!(FieldKey::group(1, 11).group_position(), Some((1, 11)));
        assert_eq!(FieldKey::group(3, 448).group_position(), Some((3, 2)));
        assert_eq!(FieldKey::tag("54").group_position(), None);
    }

    #[test]
    fn member_set_is_twelve_tags() {
        assert_eq!(GROUP_MEMBER_TAGS.len(), 12);
        assert!(is_group_member(453));
        assert!(!is_group_member(552));
    }
}
