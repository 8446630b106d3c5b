//! Configuration settings.
//!
//! Defines the main `Config` struct and environment variable loading logic.

use std::env;
use std::sync::Arc;

fn get_env_usize_or(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn get_env_u64_or(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Challenge geometry and lifecycle configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of horizontal strips cut by the rows scheme.
    pub rows_tiles: usize,
    /// Number of concentric rings cut by the circles scheme
    /// (including the fixed background ring).
    pub ring_tiles: usize,
    /// Length of the alphanumeric side-channel code.
    pub code_length: usize,
    /// Seconds a stored challenge stays verifiable.
    pub challenge_ttl_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// the reference tile counts.
    #[must_use]
    pub fn from_env() -> Arc<Self> {
        Arc::new(Self {
            rows_tiles: get_env_usize_or("ROWS_TILES", 8),
            ring_tiles: get_env_usize_or("RING_TILES", 6),
            code_length: get_env_usize_or("CODE_LENGTH", 6),
            challenge_ttl_secs: get_env_u64_or("CHALLENGE_TTL_SECS", 300),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows_tiles: 8,
            ring_tiles: 6,
            code_length: 6,
            challenge_ttl_secs: 300,
        }
    }
}
