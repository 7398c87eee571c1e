use std::path::PathBuf;

/// Errors from loading block and chart data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("block does not exist for hash: {0}")]
    UnknownBlock(String),
    #[error("block store is empty")]
    Empty,
}
