use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymptoraError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a reference document could not be retrieved.
///
/// Never surfaced to end users: the reference cache collapses every variant
/// into an empty document.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("host not in allowlist for URL {url}")]
    Blocked { url: String },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed document at {url}: {reason}")]
    Malformed { url: String, reason: String },
}

impl DataSourceError {
    /// Short machine-friendly label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Blocked { .. } => "blocked",
            Self::Network { .. } => "network",
            Self::Status { .. } => "status",
            Self::Malformed { .. } => "malformed",
        }
    }
}
