//! HTTP adapter for the remote end-of-day file server.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use super::anchors::listed_file_names;
use crate::application::ports::{DownloadError, FetchError, RemoteSourcePort};
use crate::domain::file_discovery::RemoteFile;

/// Suffix of in-progress downloads.
const PARTIAL_SUFFIX: &str = ".part";

/// Remote source backed by an HTML directory listing.
///
/// File URLs are resolved against the listing URL the way a browser resolves
/// relative links, so the listing URL should end with `/`.
#[derive(Debug, Clone)]
pub struct HttpRemoteSource {
    client: Client,
    listing_url: Url,
    listing: String,
}

impl HttpRemoteSource {
    /// Create a source for a listing URL.
    pub fn new(listing_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let parsed = Url::parse(listing_url).map_err(|e| FetchError::InvalidUrl {
            url: listing_url.to_string(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network {
                url: listing_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            listing: parsed.to_string(),
            listing_url: parsed,
        })
    }

    async fn fetch_listing(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.listing_url.clone())
            .send()
            .await
            .map_err(|e| self.listing_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.listing.clone(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| self.listing_error(&e))
    }

    fn listing_error(&self, err: &reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: self.listing.clone(),
            }
        } else {
            FetchError::Network {
                url: self.listing.clone(),
                message: err.to_string(),
            }
        }
    }

    fn file_url(&self, name: &str) -> Result<Url, DownloadError> {
        self.listing_url
            .join(name)
            .map_err(|e| DownloadError::InvalidUrl {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    async fn stream_to_file(&self, name: &str, url: Url, part: &Path) -> Result<(), DownloadError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| download_error(name, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let mut out = tokio::fs::File::create(part).await.map_err(|e| io_error(part, &e))?;
        while let Some(chunk) = response.chunk().await.map_err(|e| download_error(name, &e))? {
            out.write_all(&chunk).await.map_err(|e| io_error(part, &e))?;
        }
        out.flush().await.map_err(|e| io_error(part, &e))?;

        Ok(())
    }
}

#[async_trait]
impl RemoteSourcePort for HttpRemoteSource {
    fn listing_url(&self) -> &str {
        &self.listing
    }

    async fn probe(&self, cancel: &CancellationToken) -> Result<(), FetchError> {
        let request = async {
            let response = self
                .client
                .get(self.listing_url.clone())
                .send()
                .await
                .map_err(|e| self.listing_error(&e))?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(FetchError::Status {
                    url: self.listing.clone(),
                    status: status.as_u16(),
                })
            }
        };

        tokio::select! {
            biased;

            () = cancel.cancelled() => Err(FetchError::Cancelled { url: self.listing.clone() }),
            result = request => result,
        }
    }

    async fn list_files(&self, cancel: &CancellationToken) -> Result<Vec<String>, FetchError> {
        let html = tokio::select! {
            biased;

            () = cancel.cancelled() => {
                return Err(FetchError::Cancelled { url: self.listing.clone() });
            }
            result = self.fetch_listing() => result?,
        };

        let names = listed_file_names(&html);
        tracing::debug!(url = %self.listing, entries = names.len(), "Fetched listing");
        Ok(names)
    }

    async fn download(
        &self,
        file: &RemoteFile,
        dest_dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DownloadError> {
        let name = file.name();
        let url = self.file_url(name)?;

        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| io_error(dest_dir, &e))?;

        let path = dest_dir.join(name);
        let part = dest_dir.join(format!("{name}{PARTIAL_SUFFIX}"));

        tracing::debug!(%url, path = %path.display(), "Downloading");

        let result = tokio::select! {
            biased;

            () = cancel.cancelled() => Err(DownloadError::Cancelled { name: name.to_string() }),
            result = self.stream_to_file(name, url, &part) => result,
        };

        if let Err(e) = result {
            if let Err(cleanup) = tokio::fs::remove_file(&part).await
                && cleanup.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(path = %part.display(), error = %cleanup, "Failed to remove partial download");
            }
            return Err(e);
        }

        tokio::fs::rename(&part, &path)
            .await
            .map_err(|e| io_error(&path, &e))?;

        Ok(path)
    }
}

fn download_error(name: &str, err: &reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        DownloadError::Timeout {
            name: name.to_string(),
        }
    } else {
        DownloadError::Network {
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> DownloadError {
    DownloadError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
