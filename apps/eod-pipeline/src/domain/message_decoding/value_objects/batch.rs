//! Batch of decoded messages from one file.

use super::{ColumnOrder, DecodedMessage};

/// All messages decoded from one file with their finalized column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    messages: Vec<DecodedMessage>,
    columns: ColumnOrder,
}

impl Batch {
    /// Pair decoded messages with their column order.
    #[must_use]
    pub const fn new(messages: Vec<DecodedMessage>, columns: ColumnOrder) -> Self {
        Self { messages, columns }
    }

    /// Decoded messages in file order.
    #[must_use]
    pub fn messages(&self) -> &[DecodedMessage] {
        &self.messages
    }

    /// Column order.
    #[must_use]
    pub const fn columns(&self) -> &ColumnOrder {
        &self.columns
    }

    /// Rows aligned to the column order; absent fields are empty.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> {
        self.messages.iter().map(|msg| {
            self.columns
                .columns()
                .iter()
                .map(|key| msg.get(key).unwrap_or(""))
                .collect()
        })
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the batch has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
