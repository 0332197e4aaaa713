//! Configuration for duration inference and ranking

/// Accounting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How long someone is assumed to keep working without a new heartbeat
    pub inactivity_limit_secs: u64,

    /// Hard ceiling on the time a single heartbeat may account for
    pub max_heartbeat_secs: u64,

    /// Time credited to the final heartbeat, which has no successor
    pub trailing_seconds: u64,

    /// Aggregates below this total are left out of rankings
    pub minimum_display_seconds: u64,

    /// Number of entries in the monthly top-N lists
    pub top_n: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            inactivity_limit_secs: 120,
            max_heartbeat_secs: 300,
            trailing_seconds: 60,
            minimum_display_seconds: 60,
            top_n: 3,
        }
    }

    /// The per-gap cap actually applied during inference
    pub fn effective_cap(&self) -> u64 {
        self.inactivity_limit_secs.min(self.max_heartbeat_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
