//! HTTP catalog fetcher.

use crate::error::{CatalogClientError, Result};
use crate::types::{CatalogConfig, LibraryResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use vault_core::{CatalogError, CatalogFetcher, Track};

/// Fetches a user's track list from the catalog service.
///
/// The credential is the account-linking access token and is sent as a
/// bearer token on every request.
///
/// # Example
///
/// ```ignore
/// use vault_catalog::{CatalogConfig, HttpCatalogFetcher};
///
/// let fetcher = HttpCatalogFetcher::new(CatalogConfig::new("https://vault.example.com"))?;
/// let tracks = fetcher.fetch_library("access-token").await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct HttpCatalogFetcher {
    http: Client,
    library_url: Url,
}

impl HttpCatalogFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base = config.base_url.trim_end_matches('/');
        let library_url = Url::parse(&format!("{base}/api/library"))
            .map_err(|e| CatalogClientError::InvalidUrl(e.to_string()))?;
        if !matches!(library_url.scheme(), "http" | "https") {
            return Err(CatalogClientError::InvalidUrl(format!(
                "unsupported scheme {:?}",
                library_url.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("MusicVault/{} (Skill)", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, library_url })
    }

    /// URL the library is fetched from.
    pub fn library_url(&self) -> &Url {
        &self.library_url
    }

    /// Fetch the full library for a credential.
    pub async fn fetch_library(&self, access_token: &str) -> Result<Vec<Track>> {
        debug!(url = %self.library_url, "Fetching library");

        let response = self
            .http
            .get(self.library_url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    CatalogClientError::ServerUnreachable(e.to_string())
                } else {
                    CatalogClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let library: LibraryResponse = response.json().await.map_err(|e| {
                CatalogClientError::ParseError(format!("Failed to parse library response: {}", e))
            })?;

            debug!(tracks = library.content.len(), "Fetched library");
            Ok(library.content)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(CatalogClientError::AuthFailed(format!(
                "catalog answered {}",
                status.as_u16()
            )))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch(&self, credential: &str) -> std::result::Result<Vec<Track>, CatalogError> {
        self.fetch_library(credential).await.map_err(|err| {
            warn!(error = %err, "Catalog fetch failed");
            CatalogError::from(err)
        })
    }
}
