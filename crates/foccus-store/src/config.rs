//! Ceiling bounds and eviction tuning

pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Smallest ceiling a caller may set
    pub min_ceiling_mb: u64,

    /// Largest ceiling a caller may set
    pub max_ceiling_mb: u64,

    /// Ceiling used for non-finite input and for fresh handles
    pub default_ceiling_mb: u64,

    /// Minimum rows deleted per eviction round
    pub eviction_batch: usize,

    /// Upper bound on eviction rounds per enforcement pass
    pub max_eviction_rounds: usize,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self {
            min_ceiling_mb: 15,
            max_ceiling_mb: 100,
            default_ceiling_mb: 20,
            eviction_batch: 500,
            max_eviction_rounds: 50,
        }
    }

    /// Round and clamp a requested ceiling into `[min, max]`.
    /// Non-finite input yields the default.
    pub fn clamp_ceiling_mb(&self, requested: f64) -> u64 {
        if !requested.is_finite() {
            return self.default_ceiling_mb;
        }
        requested
            .round()
            .clamp(self.min_ceiling_mb as f64, self.max_ceiling_mb as f64) as u64
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::new();
        assert_eq!(config.min_ceiling_mb, 15);
        assert_eq!(config.max_ceiling_mb, 100);
        assert_eq!(config.default_ceiling_mb, 20);
    }

    #[test]
    fn test_clamp_ceiling_mb() {
        let config = StoreConfig::new();
        assert_eq!(config.clamp_ceiling_mb(42.0), 42);
        assert_eq!(config.clamp_ceiling_mb(42.6), 43);
        assert_eq!(config.clamp_ceiling_mb(3.0), 15);
        assert_eq!(config.clamp_ceiling_mb(-8.0), 15);
        assert_eq!(config.clamp_ceiling_mb(1e9), 100);
        assert_eq!(config.clamp_ceiling_mb(f64::NAN), 20);
        assert_eq!(config.clamp_ceiling_mb(f64::INFINITY), 20);
    }
}
