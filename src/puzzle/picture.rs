//! Picture state.
//!
//! Holds the source image, the cut tiles, and the tile order permutation
//! for one challenge. `tile_order[slot]` names the tile-id displayed in
//! `slot`; each tile's origin records where that tile's content belongs in
//! the reconstructed image. Restoring the puzzle means restoring
//! `tile_order` to identity and every rotation to zero, not moving pixels.

use crate::config::{CaptchaError, Result};
use crate::puzzle::tile::Tile;
use crate::scramble::Scheme;
use image::DynamicImage;

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    order
        .iter()
        .all(|&id| id < len && !std::mem::replace(&mut seen[id], true))
}

/// One scrambled picture: source image, tiles, and current arrangement.
#[derive(Debug, Clone)]
pub struct Picture {
    source: DynamicImage,
    scheme: Scheme,
    tiles: Vec<Tile>,
    tile_order: Vec<usize>,
    code: Option<String>,
}

impl Picture {
    /// Assembles a picture from a scramble pass.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::OrderNotPermutation`] if `tile_order` is not
    /// a permutation of `0..tiles.len()`.
    pub fn new(
        source: DynamicImage,
        scheme: Scheme,
        tiles: Vec<Tile>,
        tile_order: Vec<usize>,
    ) -> Result<Self> {
        if !is_permutation(&tile_order, tiles.len()) {
            return Err(CaptchaError::OrderNotPermutation(tiles.len()));
        }
        Ok(Self {
            source,
            scheme,
            tiles,
            tile_order,
            code: None,
        })
    }

    /// The unmodified source image.
    #[must_use]
    pub fn source(&self) -> &DynamicImage {
        &self.source
    }

    /// The scheme this picture was scrambled with.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// All tiles, indexed by tile-id.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Current display arrangement: slot index to tile-id.
    #[must_use]
    pub fn tile_order(&self) -> &[usize] {
        &self.tile_order
    }

    /// Replaces the display arrangement.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::OrderNotPermutation`] if the new order is
    /// not a permutation of `0..tiles.len()`.
    pub fn set_tile_order(&mut self, order: Vec<usize>) -> Result<()> {
        if !is_permutation(&order, self.tiles.len()) {
            return Err(CaptchaError::OrderNotPermutation(self.tiles.len()));
        }
        self.tile_order = order;
        Ok(())
    }

    /// Replaces one tile's display rotation, normalized modulo 360.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::MalformedDescriptor`] if `tile_id` names no
    /// tile in this picture.
    pub fn set_rotation(&mut self, tile_id: usize, deg: f64) -> Result<()> {
        let tile = self.tiles.get_mut(tile_id).ok_or_else(|| {
            CaptchaError::MalformedDescriptor(format!("tile id {tile_id} out of range"))
        })?;
        tile.set_rotation(deg);
        Ok(())
    }

    /// Embeds the side-channel code drawn at challenge creation.
    pub fn set_code(&mut self, code: String) {
        self.code = Some(code);
    }

    /// The embedded side-channel code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Whether the arrangement is back to the original: identity order and
    /// zero rotation everywhere.
    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.tile_order.iter().enumerate().all(|(slot, &id)| slot == id)
            && self.tiles.iter().all(|tile| tile.rotation() == 0.0)
    }
}
