//! File name pattern configuration.

use serde::{Deserialize, Serialize};

use crate::domain::file_discovery::FileType;

/// Pattern template per file type.
///
/// Templates are regular expressions containing the `{date}` placeholder,
/// which is replaced by the trade date as `YYYYMMDD` and matched at the start
/// of each listed name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternsConfig {
    /// Trade files.
    #[serde(default = "default_trades")]
    pub trades: String,
    /// Price files.
    #[serde(default = "default_price")]
    pub price: String,
    /// Instrument files.
    #[serde(default = "default_instruments")]
    pub instruments: String,
}

impl PatternsConfig {
    /// Template of a file type.
    #[must_use]
    pub fn template(&self, file_type: FileType) -> &str {
        match file_type {
            FileType::Trades => &self.trades,
            FileType::Price => &self.price,
            FileType::Instruments => &self.instruments,
        }
    }

    /// Every template with its file type.
    #[must_use]
    pub fn templates(&self) -> Vec<(FileType, String)> {
        FileType::ALL
            .iter()
            .map(|t| (*t, self.template(*t).to_string()))
            .collect()
    }
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            trades: default_trades(),
            price: default_price(),
            instruments: default_instruments(),
        }
    }
}

fn default_trades() -> String {
    r"{date}_RECO_GFOX_LCHC_EOD_PRD_\d{14}.dat".to_string()
}

fn default_price() -> String {
    r"PRICE_GFOX_PRD_{date}\.csv".to_string()
}

fn default_instruments() -> String {
    r"INSTRUMENT_GFOX_PRD_{date}\.csv".to_string()
}
