//! Message decoding value objects.

mod batch;
mod column_order;
mod decoded_message;
mod field_key;

pub use batch::Batch;
pub use column_order::ColumnOrder;
pub use decoded_message::DecodedMessage;
pub use field_key::{
    FIELD_DELIMITER, FieldKey, GROUP_COUNT_TAG, GROUP_MEMBER_TAGS, MESSAGE_START,
    PRICE_MANDATORY_TAGS, TRADE_OPTIONAL_TAGS, TRAILER_TAGS, is_group_member,
};
