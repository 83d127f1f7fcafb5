//! Remote Source Port (Driven Port)
//!
//! Interface for the counterparty's end-of-day file server: the directory
//! listing (remote index) and the file download (fetcher).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::file_discovery::RemoteFile;

/// Listing could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Listing URL is not a valid absolute URL.
    #[error("invalid listing URL '{url}': {message}")]
    InvalidUrl {
        /// Configured URL.
        url: String,
        /// Parser message.
        message: String,
    },

    /// Server answered with a non-success status.
    #[error("listing {url} returned HTTP {status}")]
    Status {
        /// Listing URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Request failed before a response arrived.
    #[error("listing {url} unreachable: {message}")]
    Network {
        /// Listing URL.
        url: String,
        /// Transport error.
        message: String,
    },

    /// Request exceeded the configured timeout.
    #[error("listing {url} timed out")]
    Timeout {
        /// Listing URL.
        url: String,
    },

    /// Caller cancelled the fetch.
    #[error("listing fetch of {url} cancelled")]
    Cancelled {
        /// Listing URL.
        url: String,
    },
}

/// A matched file could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DownloadError {
    /// File URL could not be formed from the listing URL.
    #[error("cannot resolve URL for {name}: {message}")]
    InvalidUrl {
        /// Remote file name.
        name: String,
        /// Parser message.
        message: String,
    },

    /// Server answered with a non-success status.
    #[error("download of {name} returned HTTP {status}")]
    Status {
        /// Remote file name.
        name: String,
        /// HTTP status code.
        status: u16,
    },

    /// Transport failure while requesting or streaming the body.
    #[error("download of {name} failed: {message}")]
    Network {
        /// Remote file name.
        name: String,
        /// Transport error.
        message: String,
    },

    /// Request exceeded the configured timeout.
    #[error("download of {name} timed out")]
    Timeout {
        /// Remote file name.
        name: String,
    },

    /// Local write failed.
    #[error("cannot write {path}: {message}")]
    Io {
        /// Destination path.
        path: String,
        /// I/O error.
        message: String,
    },

    /// Caller cancelled the download.
    #[error("download of {name} cancelled")]
    Cancelled {
        /// Remote file name.
        name: String,
    },
}

/// Port for the remote end-of-day file server.
#[async_trait]
pub trait RemoteSourcePort: Send + Sync {
    /// URL of the directory listing.
    fn listing_url(&self) -> &str;

    /// Check that the listing answers with a success status.
    async fn probe(&self, cancel: &CancellationToken) -> Result<(), FetchError>;

    /// Fetch the listing and return the file names it links to.
    ///
    /// Root-relative links (navigation) are excluded; names are unique and in
    /// document order.
    async fn list_files(&self, cancel: &CancellationToken) -> Result<Vec<String>, FetchError>;

    /// Stream a remote file into `dest_dir`, creating it if needed.
    ///
    /// Returns the local path, named after the remote file.
    async fn download(
        &self,
        file: &RemoteFile,
        dest_dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DownloadError>;
}
