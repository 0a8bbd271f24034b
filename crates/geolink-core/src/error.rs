use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Options were rejected before any state was touched.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// The overlay container or the map could not be created.
    #[error("failed to mount map: {0}")]
    Mount(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
