//! Grid scheme.
//!
//! Cuts the image into four quadrants at the half-width and half-height
//! boundaries. Every quadrant is quarter-turned by 90, 180, or 270
//! degrees (never 0), and the quadrant arrangement is disturbed by a
//! shuffled sequence of four named edge swaps rather than a plain
//! shuffle. The composition of those four swaps does not reach all 24
//! permutations uniformly; verification depends only on the arrangement
//! being a bijection, which it always is.

use crate::config::{CaptchaError, Result};
use crate::puzzle::{Picture, Tile};
use crate::scramble::Scheme;
use image::{DynamicImage, imageops};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

const QUADRANTS: usize = 4;

/// The four edge swaps, addressing slots of the order array:
/// top=(0,1), left=(0,2), bottom=(2,3), right=(1,3).
const EDGE_SWAPS: [(usize, usize); QUADRANTS] = [(0, 1), (0, 2), (2, 3), (1, 3)];

/// Applies the four edge swaps to the identity order in the given
/// sequence, producing the quadrant arrangement.
fn compose_swaps(sequence: &[(usize, usize)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..QUADRANTS).collect();
    for &(a, b) in sequence {
        order.swap(a, b);
    }
    order
}

/// Cuts four quadrants, quarter-turns each, and swap-scrambles the order.
///
/// # Errors
///
/// Returns [`CaptchaError::GeometryDegenerate`] if either dimension is
/// under two pixels.
pub fn scramble_grid(image: &DynamicImage, rng: &mut impl Rng) -> Result<Picture> {
    let (width, height) = (image.width(), image.height());
    if width < 2 || height < 2 {
        return Err(CaptchaError::GeometryDegenerate {
            scheme: Scheme::Grid.tag(),
            width,
            height,
            tiles: QUADRANTS,
        });
    }

    let source = image.to_rgba8();
    let (half_w, half_h) = (width / 2, height / 2);
    // Right and bottom quadrants absorb any odd remainder pixel.
    let regions = [
        (0, 0, half_w, half_h),
        (half_w, 0, width - half_w, half_h),
        (0, half_h, half_w, height - half_h),
        (half_w, half_h, width - half_w, height - half_h),
    ];

    let rotations: Vec<f64> = (0..QUADRANTS)
        .map(|_| f64::from([90u16, 180, 270][rng.random_range(0..3)]))
        .collect();

    let mut swap_sequence = EDGE_SWAPS;
    swap_sequence.shuffle(rng);
    let tile_order = compose_swaps(&swap_sequence);
    debug!(?tile_order, ?rotations, "grid quadrants scrambled");

    let mut tiles = Vec::with_capacity(QUADRANTS);
    for (&(x, y, w, h), &rotation) in regions.iter().zip(&rotations) {
        let pixels = imageops::crop_imm(&source, x, y, w, h).to_image();
        tiles.push(Tile::with_rotation(pixels, (x, y), rotation));
    }

    Picture::new(image.clone(), Scheme::Grid, tiles, tile_order)
}
