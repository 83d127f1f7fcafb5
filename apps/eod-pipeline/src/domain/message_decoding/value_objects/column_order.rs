//! Finalized column order of a batch.

use super::FieldKey;

/// Ordered, duplicate-free column keys shared by every row of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOrder {
    columns: Vec<FieldKey>,
}

impl ColumnOrder {
    pub(crate) const fn from_columns(columns: Vec<FieldKey>) -> Self {
        Self { columns }
    }

    /// Column keys in order.
    #[must_use]
    pub fn columns(&self) -> &[FieldKey] {
        &self.columns
    }

    /// Header row.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(ToString::to_string).collect()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
