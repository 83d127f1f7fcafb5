//! Local output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where downloads and tables are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory; each trade date gets a `YYYYMMDD` subdirectory.
    #[serde(default = "default_download_root")]
    pub download_root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_root: default_download_root(),
        }
    }
}

fn default_download_root() -> PathBuf {
    PathBuf::from("./eod")
}
