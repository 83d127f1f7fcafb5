//! Message Decoding Bounded Context
//!
//! Turns SOH-delimited tag/value lines (a FIX-like encoding, without session
//! semantics) into flat, column-stable tables.
//!
//! # Key Concepts
//!
//! - **DecodedMessage**: ordered field mapping of one line
//! - **Repeating group**: tag 552 declares `N` instances of a fixed 12-tag
//!   member sequence, expanded into `552_<i>_<tag>` keys
//! - **ColumnOrder**: per-batch header; trade batches end with a fixed
//!   trailer zone, price batches with the mandatory price tags
//! - **Batch**: all messages of one file plus their column order

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::DecodeError;
pub use services::{
    ColumnLayout, ColumnOrderTracker, PriceMessageDecoder, TradeMessageDecoder,
    decode_price_batch, decode_trade_batch,
};
pub use value_objects::{Batch, ColumnOrder, DecodedMessage, FieldKey};
