use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced document does not exist.
    #[error("documento no encontrado: {0}")]
    NotFound(String),

    #[error("persistence error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
