//! Challenge lifecycle management.
//!
//! Coordinates scrambling, storage, and verification of challenges. Each
//! create scrambles one loaded image, embeds a short side-channel code,
//! and stores the picture under a fresh opaque token; each verify reads
//! the stored picture without mutating it and discards it once solved.

use crate::challenge::store::{ChallengeStore, MemoryStore, StoredChallenge};
use crate::config::{CaptchaError, Config, Result};
use crate::protocol::TilesResponse;
use crate::puzzle::Picture;
use crate::scramble::{Scheme, scramble};
use crate::solve::{Solution, verify};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use image::DynamicImage;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// Alphanumeric charset for side-channel codes, with ambiguous glyphs
/// removed.
const CODE_CHARSET: &[u8] = b"ACDEFGHJKLMNPQRSTUVWXYZ2345679";

fn generate_token() -> String {
    let random_bytes: [u8; 32] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

fn draw_code(length: usize, rng: &mut impl Rng) -> String {
    (0..length)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Creates and verifies CAPTCHA challenges over an injected store.
pub struct ChallengeManager<S: ChallengeStore = MemoryStore> {
    config: Arc<Config>,
    store: S,
}

impl ChallengeManager<MemoryStore> {
    /// Creates a manager over the in-memory store.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_store(config, MemoryStore::new())
    }
}

impl<S: ChallengeStore> ChallengeManager<S> {
    /// Creates a manager over a caller-provided store.
    #[must_use]
    pub fn with_store(config: Arc<Config>, store: S) -> Self {
        Self { config, store }
    }

    /// Scrambles `image`, stores the resulting picture, and returns the
    /// opaque token plus the wire response for the client. With no scheme
    /// given, one of the three is drawn at random.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::GeometryDegenerate`] if the image cannot
    /// support the configured geometry, or [`CaptchaError::Encode`] if a
    /// tile fails encoding.
    pub fn create(
        &self,
        image: &DynamicImage,
        scheme: Option<Scheme>,
        rng: &mut impl Rng,
    ) -> Result<(String, TilesResponse)> {
        let scheme = scheme.unwrap_or_else(|| Scheme::random(rng));
        let mut picture = scramble(image, scheme, &self.config, rng)?;
        picture.set_code(draw_code(self.config.code_length, rng));

        let response = TilesResponse::from_picture(&picture)?;
        let token = generate_token();
        self.store.put(&token, StoredChallenge::new(picture));
        info!(%scheme, tiles = response.tiles.len(), "challenge created");

        Ok((token, response))
    }

    /// Verifies a submitted descriptor against the stored picture.
    /// Solved challenges are discarded; a solved result can be returned
    /// at most once per token.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::NoActiveChallenge`] if the token names no
    /// live challenge (including expired ones), or
    /// [`CaptchaError::MalformedDescriptor`] if the submission's shape
    /// does not match the stored scheme.
    pub fn verify(&self, token: &str, submitted: &Solution) -> Result<bool> {
        let challenge = self.active(token)?;
        let solved = verify(&challenge.picture, submitted)?;
        if solved {
            self.store.delete(token);
        }
        debug!(scheme = %challenge.picture.scheme(), solved, "solution checked");
        Ok(solved)
    }

    /// Verifies the side-channel code verbatim against the one embedded
    /// at creation, bypassing the solver. Case and whitespace are
    /// normalized away; nothing else is.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::NoActiveChallenge`] if the token names no
    /// live challenge.
    pub fn verify_code(&self, token: &str, code: &str) -> Result<bool> {
        let challenge = self.active(token)?;
        let normalized = code.to_uppercase().replace([' ', '\n'], "");
        let solved = challenge.picture.code() == Some(normalized.as_str());
        if solved {
            self.store.delete(token);
        }
        Ok(solved)
    }

    /// Parses a wire-level solution for the scheme stored under `token`
    /// and verifies it.
    ///
    /// # Errors
    ///
    /// Propagates [`CaptchaError::NoActiveChallenge`] and
    /// [`CaptchaError::MalformedDescriptor`].
    pub fn verify_wire(&self, token: &str, values: &[serde_json::Value]) -> Result<bool> {
        let challenge = self.active(token)?;
        let submitted = Solution::from_wire(challenge.picture.scheme(), values)?;
        self.verify(token, &submitted)
    }

    fn active(&self, token: &str) -> Result<Arc<StoredChallenge>> {
        let challenge = self
            .store
            .get(token)
            .ok_or(CaptchaError::NoActiveChallenge)?;
        if challenge.expired(self.config.challenge_ttl_secs) {
            self.store.delete(token);
            return Err(CaptchaError::NoActiveChallenge);
        }
        Ok(challenge)
    }

    /// Read access to the stored challenge, for callers that need the
    /// current state (e.g. to re-send tiles).
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::NoActiveChallenge`] if the token names no
    /// live challenge.
    pub fn challenge(&self, token: &str) -> Result<Arc<StoredChallenge>> {
        self.active(token)
    }
}
