use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The top-level category listing could not be retrieved. The message is
    /// shown to the user as-is; the status is kept for logs.
    #[error("could not retrieve categories; check the region code")]
    FetchCategories { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no products to export")]
    NoProducts,

    #[error("failed to write export file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
