//! Whole-file decoding into a [`Batch`].

use std::io::BufRead;

use crate::domain::message_decoding::errors::DecodeError;
use crate::domain::message_decoding::services::{
    ColumnOrderTracker, PriceMessageDecoder, TradeMessageDecoder,
};
use crate::domain::message_decoding::value_objects::Batch;

/// Decode every trade message of a source.
///
/// Lines without the message-start marker are skipped. The first malformed
/// message fails the whole batch.
pub fn decode_trade_batch<R: BufRead>(reader: R) -> Result<Batch, DecodeError> {
    let decoder = TradeMessageDecoder;
    let mut tracker = ColumnOrderTracker::for_trades();
    let mut messages = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(message) = decoder.decode_line(&line, index + 1)? {
            tracker.observe(&message);
            messages.push(message);
        }
    }

    Ok(Batch::new(messages, tracker.finish()))
}

/// Decode every price message of a source.
///
/// Fails with [`DecodeError::EmptyBatch`] when the source has no messages.
pub fn decode_price_batch<R: BufRead>(reader: R) -> Result<Batch, DecodeError> {
    let decoder = PriceMessageDecoder;
    let mut tracker = ColumnOrderTracker::for_prices();
    let mut messages = Vec::new();

    for line in reader.lines() {
        if let Some(message) = decoder.decode_line(&line?) {
            tracker.observe(&message);
            messages.push(message);
        }
    }

    if messages.is_empty() {
        return Err(DecodeError::EmptyBatch);
    }

    Ok(Batch::new(messages, tracker.finish()))
}
