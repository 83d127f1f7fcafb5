//! Remote file value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FileType;

/// A file listed on the remote index and classified by type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteFile {
    name: String,
    file_type: FileType,
}

impl RemoteFile {
    /// Create a new remote file.
    #[must_use]
    pub fn new(name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            name: name.into(),
            file_type,
        }
    }

    /// File name as listed remotely.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classified file type.
    #[must_use]
    pub const fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Names of the CSV tables produced from this file.
    ///
    /// Trade files yield a long and a short deliverable, price files a single
    /// one, instrument files none.
    #[must_use]
    pub fn output_names(&self) -> Vec<String> {
        match self.file_type {
            FileType::Trades => {
                let stem = self.name.strip_suffix(".dat").unwrap_or(&self.name);
                vec![
                    format!("{stem}_LONG_DUCO.csv"),
                    format!("{stem}_SHORT_DUCO.csv"),
                ]
            }
            FileType::Price => {
                let stem = self.name.strip_suffix(".csv").unwrap_or(&self.name);
                vec![format!("{stem}_DUCO.csv")]
            }
            FileType::Instruments => Vec::new(),
        }
    }
}

impl fmt::Display for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.file_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_outputs_are_long_and_short() {
        let file = RemoteFile::new(
            "20240131_RECO_GFOX_LCHC_EOD_PRD_20240131220000.dat",
            FileType::Trades,
        );
        assert_eq!(
            file.output_names(),
            vec![
                "20240131_RECO_GFOX_LCHC_EOD_PRD_20240131220000_LONG_DUCO.csv",
                "20240131_RECO_GFOX_LCHC_EOD_PRD_20240131220000_SHORT_DUCO.csv",
            ]
        );
    }

    #[test]
    fn price_output_gets_duco_suffix() {
        let file = RemoteFile::new("PRICE_GFOX_PRD_20240131.csv", FileType::Price);
        assert_eq!(file.output_names(), vec!["PRICE_GFOX_PRD_20240131_DUCO.csv"]);
    }

    #[test]
    fn instruments_have_no_outputs() {
        let file = RemoteFile::new("INSTRUMENT_GFOX_PRD_20240131.csv", FileType::Instruments);
        assert!(file.output_names().is_empty());
    }

    #[test]
    fn display_includes_type() {
        let file = RemoteFile::new("PRICE_GFOX_PRD_20240131.csv", FileType::Price);
        assert_eq!(file.to_string(), "PRICE_GFOX_PRD_20240131.csv (PRICE)");
    }
}
