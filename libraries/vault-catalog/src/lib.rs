//! Music Vault Catalog Client
//!
//! HTTP client for the Music Vault catalog API, used to fetch the track list
//! of a linked account.
//!
//! # Protocol
//!
//! - `GET {base_url}/api/library` with `Authorization: Bearer <token>`
//! - Body: `{ "content": [{ "title", "url", "collection" }, ...] }`
//! - 401/403 means the credential was rejected; anything else is a
//!   network-class failure
//!
//! # Example
//!
//! ```ignore
//! use vault_catalog::{CatalogConfig, HttpCatalogFetcher};
//! use vault_core::CatalogFetcher;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpCatalogFetcher::new(CatalogConfig::new("https://vault.example.com"))?;
//!     let tracks = fetcher.fetch("access-token").await?;
//!     println!("Found {} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::HttpCatalogFetcher;
pub use error::{CatalogClientError, Result};
pub use types::{CatalogConfig, LibraryResponse};
