//! fetch
//!
//! Download the repository manifest and the distribution descriptor.
//!
//! # Design
//!
//! Both documents are fetched from the raw-content host with a single GET.
//! A non-success status is an error carrying the URL and status; there is no
//! retry. The body is parsed into the typed document before returning.
//!
//! # Example
//!
//! ```ignore
//! use ros2_release_branches::fetch::Fetcher;
//!
//! let fetcher = Fetcher::new(&config);
//! let repos = fetcher.download_manifest().await?;
//! let distribution = fetcher.download_distribution(&release).await?;
//! ```

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::{Config, ManifestConfig, RosdistroConfig};
use crate::core::documents::{DistributionFile, DocumentError, ReposFile};
use crate::core::types::ReleaseName;
use crate::core::urls::{GitHubUrls, UrlError};

/// User-Agent header value for downloads.
const USER_AGENT_VALUE: &str = "ros2-release-branches";

/// Errors from downloading a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured repository URL cannot be converted.
    #[error(transparent)]
    Url(#[from] UrlError),

    /// The request could not be sent or the body could not be read.
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body is not the expected document.
    #[error("invalid document at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: DocumentError,
    },
}

/// Downloads the two input documents.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    urls: GitHubUrls,
    manifest: ManifestConfig,
    rosdistro: RosdistroConfig,
}

impl Fetcher {
    /// Create a fetcher for the configured locations.
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            client,
            urls: config.urls(),
            manifest: config.manifest.clone(),
            rosdistro: config.rosdistro.clone(),
        }
    }

    /// Raw URL of the manifest, e.g.
    /// `https://raw.githubusercontent.com/ros2/ros2/rolling/ros2.repos`.
    pub fn manifest_url(&self) -> Result<String, FetchError> {
        let path = format!("/{}/{}", self.manifest.branch, self.manifest.file);
        Ok(self.urls.raw_from_url(&self.manifest.repo_url, &path)?)
    }

    /// Raw URL of the distribution file for `release`, e.g.
    /// `https://raw.githubusercontent.com/ros/rosdistro/master/kappa/distribution.yaml`.
    pub fn distribution_url(&self, release: &ReleaseName) -> Result<String, FetchError> {
        let path = format!("/{}/{}/distribution.yaml", self.rosdistro.branch, release);
        Ok(self.urls.raw_from_url(&self.rosdistro.repo_url, &path)?)
    }

    /// Download and parse the repository manifest.
    pub async fn download_manifest(&self) -> Result<ReposFile, FetchError> {
        let url = self.manifest_url()?;
        info!("Downloading {} from {}", self.manifest.file, url);

        let body = self.get_text(&url).await?;
        ReposFile::parse(&body).map_err(|source| FetchError::Parse { url, source })
    }

    /// Download and parse the distribution descriptor for `release`.
    pub async fn download_distribution(
        &self,
        release: &ReleaseName,
    ) -> Result<DistributionFile, FetchError> {
        let url = self.distribution_url(release)?;
        info!("Downloading distribution.yaml from {}", url);

        let body = self.get_text(&url).await?;
        DistributionFile::parse(&body).map_err(|source| FetchError::Parse { url, source })
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
