//! Heartbeat record types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who produced the edit behind a heartbeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Human,
    Ai,
    Debugging,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Human => "human",
            Source::Ai => "ai",
            Source::Debugging => "debugging",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown heartbeat source: {0:?} (expected human, ai or debugging)")]
pub struct ParseSourceError(pub String);

impl FromStr for Source {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Source::Human),
            "ai" => Ok(Source::Ai),
            "debugging" => Ok(Source::Debugging),
            _ => Err(ParseSourceError(s.to_string())),
        }
    }
}

/// A single activity ping emitted while a file is being edited.
///
/// Heartbeats are immutable once created; the store only ever inserts or
/// deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heartbeat {
    /// Blank when a producer omits it; ingest assigns a fresh one
    #[serde(default)]
    pub id: String,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub file_path: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub source: Source,
}

impl Heartbeat {
    /// Build a heartbeat from a raw editor path, deriving the language token
    /// from the file extension.
    pub fn new(
        id: impl Into<String>,
        timestamp: i64,
        raw_path: &str,
        project: Option<String>,
        branch: Option<String>,
        source: Source,
    ) -> Self {
        let file_path = normalize_path(raw_path);
        let language = language_from_path(&file_path);
        Self {
            id: id.into(),
            timestamp,
            file_path,
            language,
            project: project.filter(|p| !p.trim().is_empty()),
            branch: branch.filter(|b| !b.trim().is_empty()),
            source,
        }
    }
}

/// Convert path separators to `/` and drop a leading `./`
pub fn normalize_path(raw: &str) -> String {
    let normalized = raw.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .map(str::to_string)
        .unwrap_or(normalized)
}

/// Extension of the last path segment without the dot, or empty
pub fn language_from_path(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => file_name[idx + 1..].to_string(),
    }
}
