//! Catalog loading from a local file or an HTTP(S) URL

use std::path::PathBuf;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::Product;

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog fetch returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Interpret a configured source string: http(s) values are URLs, everything else a path
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            CatalogSource::Url(source.to_string())
        } else {
            CatalogSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

/// On-disk / on-wire catalog document
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

/// Reads the catalog document on every call; no caching
pub struct CatalogLoader {
    source: CatalogSource,
    http: Client,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource) -> Self {
        debug!(%source, "CatalogLoader::new: called");
        Self {
            source,
            http: Client::new(),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Fetch and parse the product list
    pub async fn load_products(&self) -> Result<Vec<Product>, LoadError> {
        debug!(source = %self.source, "load_products: called");
        let body = match &self.source {
            CatalogSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?,
            CatalogSource::Url(url) => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    debug!(%status, "load_products: non-success status");
                    return Err(LoadError::Status {
                        status: status.as_u16(),
                    });
                }
                response.text().await?
            }
        };

        let products = parse_catalog(&body)?;
        info!(count = products.len(), source = %self.source, "Catalog loaded");
        Ok(products)
    }
}

/// Parse a `{ "products": [...] }` document
pub fn parse_catalog(body: &str) -> Result<Vec<Product>, LoadError> {
    let document: CatalogDocument = serde_json::from_str(body)?;
    Ok(document.products)
}
