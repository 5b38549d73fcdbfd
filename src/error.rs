use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Failed to read file: {path}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse host snapshot: {path}")]
    SnapshotParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AuditError>;
