use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rows were still present after clearing and one retry
    #[error("clearing the store left {remaining} heartbeats behind")]
    ClearIncomplete { remaining: u64 },

    #[error("unsupported schema version {0}")]
    UnsupportedSchema(u32),
}

pub type Result<T> = std::result::Result<T, StoreError>;
