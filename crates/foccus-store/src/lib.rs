//! Size-bounded SQLite heartbeat store with oldest-first eviction

mod config;
mod error;
mod schema;
mod storage;

pub use config::{StoreConfig, BYTES_PER_MB};
pub use error::{Result, StoreError};
pub use schema::{StoreOrigin, SCHEMA_VERSION};
pub use storage::{EvictionReport, HeartbeatStore};
