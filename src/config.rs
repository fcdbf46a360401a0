//! Configuration Module
//!
//! Construction parameters for the cache, settable in code or loaded from
//! environment variables.

use std::env;
use std::time::Duration;

use crate::error::{ConfigError, Result};

// == Cache Config ==
/// Cache construction parameters.
///
/// Every knob is optional; `None` (or a zero value) disables the feature:
/// no default expiration, no background sweep, no size limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied by `set`/`set_all` when no explicit TTL is given
    pub default_ttl: Option<Duration>,
    /// Interval between background sweeps
    pub cleanup_interval: Option<Duration>,
    /// Maximum number of entries
    pub max_size: Option<usize>,
}

impl CacheConfig {
    // == Constructor ==
    /// Creates a config with every feature disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default TTL for writes without an explicit one.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Enables the background sweep with the given interval.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = Some(interval);
        self
    }

    /// Caps the cache at `max_size` entries.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    // == From Env ==
    /// Loads a config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - default TTL in milliseconds
    /// - `CACHE_CLEANUP_INTERVAL_MS` - sweep interval in milliseconds
    /// - `CACHE_MAX_SIZE` - maximum number of entries
    ///
    /// An unset variable leaves the feature disabled and a zero value is the
    /// same as unset; a variable that does not parse as a number is an
    /// error.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            default_ttl: read_env_ms("CACHE_DEFAULT_TTL_MS")?,
            cleanup_interval: read_env_ms("CACHE_CLEANUP_INTERVAL_MS")?,
            max_size: read_env_count("CACHE_MAX_SIZE")?,
        })
    }
}

fn read_env_raw(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: "<non-unicode>".to_string(),
        }),
    }
}

fn read_env_ms(name: &str) -> Result<Option<Duration>> {
    match read_env_raw(name)? {
        Some(raw) => {
            let ms: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw.clone(),
            })?;
            Ok((ms > 0).then(|| Duration::from_millis(ms)))
        }
        None => Ok(None),
    }
}

fn read_env_count(name: &str) -> Result<Option<usize>> {
    match read_env_raw(name)? {
        Some(raw) => {
            let count: usize = raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw.clone(),
            })?;
            Ok((count > 0).then_some(count))
        }
        None => Ok(None),
    }
}
