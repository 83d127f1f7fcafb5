//! End-of-day file type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of end-of-day file published by the clearing house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// Trade file (tag/value messages with repeating parties group).
    Trades,
    /// Settlement price file (flat tag/value messages).
    Price,
    /// Instrument reference file (downloaded as-is).
    Instruments,
}

impl FileType {
    /// All file types, in processing order.
    pub const ALL: [Self; 3] = [Self::Trades, Self::Price, Self::Instruments];

    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trades => "TRADES",
            Self::Price => "PRICE",
            Self::Instruments => "INSTRUMENTS",
        }
    }

    /// Whether files of this type are decoded into CSV tables after download.
    #[must_use]
    pub const fn is_decoded(&self) -> bool {
        match self {
            Self::Trades | Self::Price => true,
            Self::Instruments => false,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown file type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file type '{0}' (expected trades, price or instruments)")]
pub struct UnknownFileType(pub String);

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trades" | "trade" => Ok(Self::Trades),
            "price" | "prices" => Ok(Self::Price),
            "instruments" | "instrument" => Ok(Self::Instruments),
            _ => Err(UnknownFileType(s.to_string())),
        }
    }
}
