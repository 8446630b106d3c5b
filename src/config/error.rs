//! Error types and result aliases.
//!
//! Defines the core `CaptchaError` enumeration and common `Result` type.

use thiserror::Error;

/// CAPTCHA-core errors.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Scheme tag is not one of the supported scramble schemes.
    #[error("unknown scramble scheme: {0}")]
    UnknownScheme(String),

    /// Image dimensions cannot support the configured tile geometry.
    #[error("image {width}x{height} too small to cut {tiles} {scheme} tiles")]
    GeometryDegenerate {
        scheme: &'static str,
        width: u32,
        height: u32,
        tiles: usize,
    },

    /// Verification requested for a token with no stored challenge.
    #[error("no active challenge for this token")]
    NoActiveChallenge,

    /// Submitted solution does not have the active scheme's shape.
    #[error("malformed solution descriptor: {0}")]
    MalformedDescriptor(String),

    /// A tile order update would break the permutation invariant.
    #[error("tile order is not a permutation of 0..{0}")]
    OrderNotPermutation(usize),

    /// Tile image could not be encoded for transport.
    #[error("tile encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type alias for `CaptchaError`.
pub type Result<T> = std::result::Result<T, CaptchaError>;
