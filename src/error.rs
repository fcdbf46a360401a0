//! Error types for cache configuration
//!
//! Core cache operations are total: a miss is `None`, removing an absent
//! key is a no-op, and closing twice is safe. The only fallible surface is
//! loading configuration from the environment.

use thiserror::Error;

// == Config Error Enum ==
/// Error raised while loading [`CacheConfig`](crate::CacheConfig) from the
/// environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable is set but does not hold a usable number
    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: String, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
