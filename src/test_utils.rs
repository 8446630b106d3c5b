//! Test utilities and shared configuration.
//!
//! This module provides common helpers for unit and integration tests,
//! reducing duplication across the codebase.

#[cfg(any(test, feature = "testing"))]
use crate::config::Config;
#[cfg(any(test, feature = "testing"))]
use image::{DynamicImage, Rgba, RgbaImage};
#[cfg(any(test, feature = "testing"))]
use rand::SeedableRng;
#[cfg(any(test, feature = "testing"))]
use rand::rngs::StdRng;
#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

/// Creates the reference geometry configuration for testing purposes.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        rows_tiles: 8,
        ring_tiles: 6,
        code_length: 6,
        challenge_ttl_secs: 300,
    })
}

/// Builds an opaque RGBA gradient, giving every pixel a distinct value so
/// misplaced tiles never compare equal.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 7 % 256) as u8,
            (y * 11 % 256) as u8,
            ((x + y) * 13 % 256) as u8,
            255,
        ])
    }))
}

/// Deterministic RNG for asserting exact scramble outputs.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
