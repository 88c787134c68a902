use thiserror::Error;

/// Failures from the catalog API. Callers catch and degrade (empty list,
/// not-found page, logged warning); there is no automatic retry.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Non-success HTTP status, carrying the status code and response body.
    #[error("Error TMDB: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid catalog response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl CatalogError {
    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            CatalogError::Status { status, .. } => Some(*status),
            CatalogError::Request(e) => e.status(),
            CatalogError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::NOT_FOUND)
    }
}
