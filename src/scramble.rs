//! Scrambling schemes.
//!
//! Three geometries cut a source image into tiles and disturb their
//! arrangement: horizontal strips (permutation only), a quadrant grid
//! (permutation plus quarter-turn rotation), and concentric rings
//! (rotation only).

pub mod grid;
pub mod rings;
pub mod rows;

use crate::config::{CaptchaError, Config, Result};
use crate::puzzle::Picture;
use image::DynamicImage;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Closed set of scrambling geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Equal-height horizontal strips, shuffled.
    Rows,
    /// Four quadrants, swapped and quarter-turned.
    Grid,
    /// Concentric rings, each turned about the center.
    Rings,
}

impl Scheme {
    /// Wire tag for this scheme.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Grid => "grid",
            Self::Rings => "circles",
        }
    }

    /// Draws one of the three schemes uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..3) {
            0 => Self::Rows,
            1 => Self::Grid,
            _ => Self::Rings,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Scheme {
    type Err = CaptchaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rows" => Ok(Self::Rows),
            "grid" => Ok(Self::Grid),
            "circles" => Ok(Self::Rings),
            other => Err(CaptchaError::UnknownScheme(other.to_string())),
        }
    }
}

/// Scrambles `image` with the given scheme.
///
/// All randomness (shuffle order, rotation draws) comes from the caller's
/// `rng`, so tests can fix the sequence and assert exact outputs.
///
/// # Errors
///
/// Returns [`CaptchaError::GeometryDegenerate`] if the image is too small
/// for the configured tile or ring count.
pub fn scramble(
    image: &DynamicImage,
    scheme: Scheme,
    config: &Config,
    rng: &mut impl Rng,
) -> Result<Picture> {
    match scheme {
        Scheme::Rows => rows::scramble_rows(image, config.rows_tiles, rng),
        Scheme::Grid => grid::scramble_grid(image, rng),
        Scheme::Rings => rings::scramble_rings(image, config.ring_tiles, rng),
    }
}
