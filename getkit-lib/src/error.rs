use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GetKitError {
    #[error("Invalid system '{0}': expected one of win, linux, mac")]
    InvalidOs(String),

    #[error("Catalog not found: {}", path.display())]
    CatalogNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is malformed: {}", path.display())]
    CatalogMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Software not included in catalog: {0}")]
    NotFoundInCatalog(String),

    #[error("Request to {url} failed")]
    NetworkTransportFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode release information for {repo}")]
    ResponseParseFailure {
        repo: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write download to {}", path.display())]
    DownloadWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable '{0}' holding the GitHub token is not set")]
    MissingToken(String),

    #[error("Could not determine the home directory; pass --download-dir and --catalog-dir")]
    NoHomeDirectory,

    #[error("Failed to create HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GetKitError>;
