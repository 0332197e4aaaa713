//! Heartbeat types, data paths and file I/O shared across foccus crates

mod io;
mod paths;
mod settings;
mod types;

pub use io::{append_jsonl, atomic_write, read_jsonl, read_jsonl_from};
pub use paths::{Paths, HOME_ENV};
pub use settings::{Settings, DEFAULT_CEILING_MB};
pub use types::{language_from_path, normalize_path, Heartbeat, ParseSourceError, Source};
