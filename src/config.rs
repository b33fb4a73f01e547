//! Configuration Module
//!
//! Cache limits passed at construction, plus the server settings the binary
//! loads from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::{CacheError, Result};

/// Default maximum number of cached parent folders
pub const DEFAULT_MAX_CACHE_SIZE: usize = 30;

/// Default freshness window in seconds
pub const DEFAULT_MAX_AGE_SECS: u64 = 60;

// == Cache Config ==
/// Limits for a single folder cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub max_cache_size: usize,
    /// Seconds after which an entry is refetched on next access
    pub max_age_secs: u64,
}

impl CacheConfig {
    /// Creates a validated config.
    pub fn new(max_cache_size: usize, max_age_secs: u64) -> Result<Self> {
        let config = Self {
            max_cache_size,
            max_age_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Both limits must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.max_cache_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_cache_size must be greater than 0".to_string(),
            ));
        }
        if self.max_age_secs == 0 {
            return Err(CacheError::InvalidConfig(
                "max_age_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            max_age_secs: DEFAULT_MAX_AGE_SECS,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache limits
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// JSON file holding the folder hierarchy served as fetch source
    pub folder_tree_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FOLDER_CACHE_MAX_SIZE` - Maximum cached folders (default: 30)
    /// - `FOLDER_CACHE_MAX_AGE` - Freshness window in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FOLDER_TREE_PATH` - Folder hierarchy file (default: unset)
    ///
    /// Zero or unparseable limits fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig {
                max_cache_size: positive_var("FOLDER_CACHE_MAX_SIZE")
                    .unwrap_or(DEFAULT_MAX_CACHE_SIZE),
                max_age_secs: positive_var("FOLDER_CACHE_MAX_AGE")
                    .unwrap_or(DEFAULT_MAX_AGE_SECS),
            },
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            folder_tree_path: env::var("FOLDER_TREE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            folder_tree_path: None,
        }
    }
}

fn positive_var<T>(name: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v > T::default())
}
