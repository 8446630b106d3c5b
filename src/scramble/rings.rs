//! Rings scheme.
//!
//! Treats the image as concentric annuli about its midpoint. Ring 0 is a
//! single fixed background tile: the full image with the annulus band cut
//! to transparent. Rings 1..n-1 each keep only their band, with everything
//! else transparent, and are turned by a random multiple of `360/n`
//! degrees. Rings cannot change radial position, so the order stays
//! identity and only rotations scramble.

use crate::config::{CaptchaError, Result};
use crate::puzzle::tile::normalize_degrees;
use crate::puzzle::{Picture, Tile};
use crate::scramble::Scheme;
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use rand::Rng;
use tracing::debug;

/// Filled-circle alpha stencil: 255 between `inner` and `outer`, 0
/// elsewhere. The same rasterization backs every ring, so adjacent bands
/// partition the annulus exactly.
fn annulus_mask(width: u32, height: u32, center: (i32, i32), inner: i32, outer: i32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    draw_filled_circle_mut(&mut mask, center, outer, Luma([255]));
    draw_filled_circle_mut(&mut mask, center, inner, Luma([0]));
    mask
}

fn masked(source: &RgbaImage, mask: &GrayImage, invert: bool) -> RgbaImage {
    let mut out = source.clone();
    for (pixel, stencil) in out.pixels_mut().zip(mask.pixels()) {
        let coverage = if invert { 255 - stencil[0] } else { stencil[0] };
        pixel[3] = ((u16::from(pixel[3]) * u16::from(coverage)) / 255) as u8;
    }
    out
}

/// Cuts `count` rings and turns each non-background ring randomly.
///
/// # Errors
///
/// Returns [`CaptchaError::GeometryDegenerate`] if the radius step
/// `min(width, height) / (2 * count)` comes out to zero pixels.
pub fn scramble_rings(image: &DynamicImage, count: usize, rng: &mut impl Rng) -> Result<Picture> {
    let (width, height) = (image.width(), image.height());
    let step = width.min(height) / (2 * count.max(1) as u32);
    if count < 2 || step == 0 {
        return Err(CaptchaError::GeometryDegenerate {
            scheme: Scheme::Rings.tag(),
            width,
            height,
            tiles: count,
        });
    }

    let source = image.to_rgba8();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let step = step as i32;
    debug!(width, height, count, step, "cutting rings");

    let mut tiles = Vec::with_capacity(count);

    // Background: full image minus the whole annulus band.
    let band = annulus_mask(width, height, center, step, step * count as i32);
    tiles.push(Tile::annular(masked(&source, &band, true), 0.0));

    let turn = 360.0 / count as f64;
    for ring in 1..count as i32 {
        let mask = annulus_mask(width, height, center, step * ring, step * (ring + 1));
        let angle = normalize_degrees(f64::from(rng.random_range(0..=count as u32)) * turn);
        tiles.push(Tile::annular(masked(&source, &mask, false), angle));
    }

    let tile_order: Vec<usize> = (0..count).collect();
    Picture::new(image.clone(), Scheme::Rings, tiles, tile_order)
}
