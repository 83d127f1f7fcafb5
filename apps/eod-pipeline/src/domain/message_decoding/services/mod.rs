//! Message decoding domain services.

mod batch_decoder;
mod column_tracker;
mod price_decoder;
mod trade_decoder;

pub use batch_decoder::{decode_price_batch, decode_trade_batch};
pub use column_tracker::{ColumnLayout, ColumnOrderTracker};
pub use price_decoder::PriceMessageDecoder;
pub use trade_decoder::TradeMessageDecoder;
