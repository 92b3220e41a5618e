use pb_core::PostbackError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("open database: {0}")]
    Store(#[from] PostbackError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}
