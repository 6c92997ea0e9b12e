//! # Config - runtime settings for the `gcs` tool
//!
//! Settings come from three layers, later ones winning:
//!
//! ```text
//! defaults  ->  environment  ->  command-line flags (applied by the CLI)
//! ```
//!
//! ## Environment
//!
//! ```text
//! GCS_TABLE_PATH   set file to build / query    (default: "table.gcs")
//! GCS_DIVISOR      false-positive divisor P     (default: 1024, ~0.1%)
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Default set file name.
pub const DEFAULT_TABLE_PATH: &str = "table.gcs";

/// Default divisor: a false-positive rate of 1/1024.
pub const DEFAULT_DIVISOR: u32 = 1024;

/// Environment variable overriding [`GcsConfig::table_path`].
pub const ENV_TABLE_PATH: &str = "GCS_TABLE_PATH";

/// Environment variable overriding [`GcsConfig::divisor`].
pub const ENV_DIVISOR: &str = "GCS_DIVISOR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?} as an unsigned integer")]
    Parse { var: String, value: String },

    #[error("divisor must be a power of two, got {0}")]
    DivisorNotPowerOfTwo(u32),
}

/// Settings shared by `build` and `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsConfig {
    /// Where the set file lives.
    pub table_path: PathBuf,
    /// `P`: the false-positive rate is `1 / divisor`.
    pub divisor: u32,
}

impl Default for GcsConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            divisor: DEFAULT_DIVISOR,
        }
    }
}

impl GcsConfig {
    /// Defaults overlaid with `GCS_TABLE_PATH` / `GCS_DIVISOR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading variables through
    /// `lookup`, so callers (and tests) can supply their own source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(path) = lookup(ENV_TABLE_PATH) {
            cfg.table_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_DIVISOR) {
            cfg.divisor = raw.trim().parse().map_err(|_| ConfigError::Parse {
                var: ENV_DIVISOR.to_string(),
                value: raw.clone(),
            })?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks that the divisor is usable as a Rice parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.divisor.is_power_of_two() {
            return Err(ConfigError::DivisorNotPowerOfTwo(self.divisor));
        }
        Ok(())
    }

    /// Target false-positive probability, `1 / divisor`.
    #[must_use]
    pub fn false_positive_rate(&self) -> f64 {
        1.0 / f64::from(self.divisor)
    }
}
