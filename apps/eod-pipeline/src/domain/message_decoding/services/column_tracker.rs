//! Batch-scoped column order tracking.
//!
//! Trade tables use three zones: top-level keys in first-seen order, then
//! repeating-group keys by instance and member order, then the fixed trailer
//! tags, which are always emitted even when no message carries them. Price
//! tables keep plain first-seen order and append the mandatory tags that never
//! appeared.

use std::collections::HashSet;

use crate::domain::message_decoding::value_objects::{
    ColumnOrder, DecodedMessage, FieldKey, PRICE_MANDATORY_TAGS, TRAILER_TAGS,
};

/// Column layout rules of a table kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Zoned layout with the trailer always last.
    Trade,
    /// First-seen layout with missing mandatory tags appended.
    Price,
}

/// Accumulates the column order of one batch.
///
/// Create one tracker per file; it is consumed by [`ColumnOrderTracker::finish`].
#[derive(Debug, Clone)]
pub struct ColumnOrderTracker {
    layout: ColumnLayout,
    trailer: Vec<FieldKey>,
    seen: HashSet<FieldKey>,
    leading: Vec<FieldKey>,
    groups: Vec<FieldKey>,
}

impl ColumnOrderTracker {
    /// Create a tracker for a layout.
    #[must_use]
    pub fn new(layout: ColumnLayout) -> Self {
        let trailer = match layout {
            ColumnLayout::Trade => TRAILER_TAGS.iter().map(|t| FieldKey::number(*t)).collect(),
            ColumnLayout::Price => PRICE_MANDATORY_TAGS.iter().map(|t| FieldKey::tag(*t)).collect(),
        };

        Self {
            layout,
            trailer,
            seen: HashSet::new(),
            leading: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Tracker for trade batches.
    #[must_use]
    pub fn for_trades() -> Self {
        Self::new(ColumnLayout::Trade)
    }

    /// Tracker for price batches.
    #[must_use]
    pub fn for_prices() -> Self {
        Self::new(ColumnLayout::Price)
    }

    /// Record the keys of the next message in file order.
    pub fn observe(&mut self, message: &DecodedMessage) {
        for key in message.keys() {
            if self.seen.contains(key) {
                continue;
            }
            self.seen.insert(key.clone());

            match self.layout {
                ColumnLayout::Trade if key.is_group() => self.groups.push(key.clone()),
                ColumnLayout::Trade if self.trailer.contains(key) => {}
                ColumnLayout::Trade | ColumnLayout::Price => self.leading.push(key.clone()),
            }
        }
    }

    /// Finalize the column order.
    #[must_use]
    pub fn finish(self) -> ColumnOrder {
        let Self {
            layout,
            trailer,
            leading,
            mut groups,
            ..
        } = self;

        let mut columns = leading;
        match layout {
            ColumnLayout::Trade => {
                groups.sort_by_key(FieldKey::group_position);
                columns.extend(groups);
                columns.extend(trailer);
            }
            ColumnLayout::Price => {
                for key in trailer {
                    if !columns.contains(&key) {
                        columns.push(key);
                    }
                }
            }
        }

        ColumnOrder::from_columns(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn message(keys: &[FieldKey]) -> DecodedMessage {
        let mut msg = DecodedMessage::new();
        for (i, key) in keys.iter().enumerate() {
            msg.insert(key.clone(), i.to_string());
        }
        msg
    }

    fn header(order: &ColumnOrder) -> Vec<String> {
        order.header()
    }

    #[test]
    fn trade_layout_zones() {
        let mut tracker = ColumnOrderTracker::for_trades();
        tracker.observe(&message(&[
            FieldKey::tag("8"),
            FieldKey::tag("10"),
            FieldKey::tag("35"),
            FieldKey::tag("552"),
            FieldKey::group(1, 54),
            FieldKey::group(1, 453),
        ]));
        tracker.observe(&message(&[
            FieldKey::tag("8"),
            FieldKey::tag("570"),
            FieldKey::tag("55"),
        ]));

        assert_eq!(
            header(&tracker.finish()),
            vec!["8", "35", "552", "55", "552_1_54", "552_1_453", "570", "571", "828", "10"]
        );
    }

    #[test]
    fn trailer_present_without_any_message() {
        let order = ColumnOrderTracker::for_trades().finish();
        assert_eq!(header(&order), vec!["570", "571", "828", "10"]);
    }

    #[test]
    fn group_keys_sorted_by_instance_then_member() {
        let mut tracker = ColumnOrderTracker::for_trades();
        // A first message with one instance, a later one with two.
        tracker.observe(&message(&[FieldKey::group(1, 54), FieldKey::group(1, 11)]));
        tracker.observe(&message(&[
            FieldKey::group(1, 54),
            FieldKey::group(1, 448),
            FieldKey::group(1, 11),
            FieldKey::group(2, 54),
            FieldKey::group(2, 11),
        ]));

        let order = tracker.finish();
        assert_eq!(
            &header(&order)[..5],
            &["552_1_54", "552_1_448", "552_1_11", "552_2_54", "552_2_11"]
        );
    }

    #[test]
    fn price_layout_appends_missing_mandatory_tags() {
        let mut tracker = ColumnOrderTracker::for_prices();
        tracker.observe(&message(&[FieldKey::tag("8"), FieldKey::tag("202"), FieldKey::tag("55")]));
        tracker.observe(&message(&[FieldKey::tag("8"), FieldKey::tag("731")]));

        assert_eq!(
            header(&tracker.finish()),
            vec!["8", "202", "55", "731", "201", "527"]
        );
    }

    #[test]
    fn every_key_appears_once() {
        let mut tracker = ColumnOrderTracker::for_trades();
        for _ in 0..3 {
            tracker.observe(&message(&[FieldKey::tag("8"), FieldKey::tag("10"), FieldKey::group(1, 54)]));
        }
        let order = tracker.finish();
        let mut columns = header(&order);
        let len = columns.len();
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), len);
    }

    fn key_strategy() -> impl Strategy<Value = FieldKey> {
        prop_oneof![
            (1u32..40).prop_map(FieldKey::number),
            (1usize..3, 0usize..12).prop_map(|(i, m)| FieldKey::group(
                i,
                crate::domain::message_decoding::value_objects::GROUP_MEMBER_TAGS[m]
            )),
        ]
    }

    proptest! {
        #[test]
        fn order_depends_on_keys_not_values(
            batch in prop::collection::vec(prop::collection::vec(key_strategy(), 0..10), 1..6),
            seed in any::<u64>(),
        ) {
            let mut plain = ColumnOrderTracker::for_trades();
            let mut shuffled_values = ColumnOrderTracker::for_trades();

            for keys in &batch {
                plain.observe(&message(keys));

                let mut msg = DecodedMessage::new();
                for (i, key) in keys.iter().enumerate() {
                    msg.insert(key.clone(), format!("{}", seed.wrapping_add(i as u64)));
                }
                shuffled_values.observe(&msg);
            }

            prop_assert_eq!(plain.finish(), shuffled_values.finish());
        }
    }
}
