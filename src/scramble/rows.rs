//! Rows scheme.
//!
//! Cuts the image into equal-height horizontal strips and shuffles their
//! order. Strip height truncates by integer division; the last strip
//! absorbs the remainder so the cut covers every source row.

use crate::config::{CaptchaError, Result};
use crate::puzzle::{Picture, Tile};
use crate::scramble::Scheme;
use image::{DynamicImage, imageops};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Cuts `count` strips and shuffles them into a random permutation.
///
/// # Errors
///
/// Returns [`CaptchaError::GeometryDegenerate`] if the image has fewer
/// pixel rows than strips, or `count` is less than two.
pub fn scramble_rows(image: &DynamicImage, count: usize, rng: &mut impl Rng) -> Result<Picture> {
    let (width, height) = (image.width(), image.height());
    if count < 2 || u64::from(height) < count as u64 {
        return Err(CaptchaError::GeometryDegenerate {
            scheme: Scheme::Rows.tag(),
            width,
            height,
            tiles: count,
        });
    }

    let source = image.to_rgba8();
    let strip_height = height / count as u32;
    debug!(width, height, count, strip_height, "cutting row strips");

    let mut tiles = Vec::with_capacity(count);
    for index in 0..count as u32 {
        let top = strip_height * index;
        let cut_height = if index == count as u32 - 1 {
            height - top
        } else {
            strip_height
        };
        let pixels = imageops::crop_imm(&source, 0, top, width, cut_height).to_image();
        tiles.push(Tile::new(pixels, (0, top)));
    }

    let mut tile_order: Vec<usize> = (0..count).collect();
    tile_order.shuffle(rng);

    Picture::new(image.clone(), Scheme::Rows, tiles, tile_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gradient_image, seeded_rng};

    #[test]
    fn test_order_is_a_permutation() {
        let image = gradient_image(64, 64);
        let mut rng = seeded_rng(1);
        let pic = scramble_rows(&image, 8, &mut rng).unwrap();

        let mut sorted: Vec<usize> = pic.tile_order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
        assert_eq!(pic.tiles().len(), 8);
    }

    #[test]
    fn test_strips_are_unrotated_and_anchored() {
        let image = gradient_image(40, 64);
        let mut rng = seeded_rng(2);
        let pic = scramble_rows(&image, 8, &mut rng).unwrap();

        for (id, tile) in pic.tiles().iter().enumerate() {
            assert_eq!(tile.rotation(), 0.0);
            assert_eq!(tile.origin(), (0, 8 * id as u32));
            assert_eq!(tile.pixels().dimensions(), (40, 8));
        }
    }

    #[test]
    fn test_last_strip_absorbs_remainder() {
        // 67 rows over 8 strips: seven 8-row strips plus an 11-row tail.
        let image = gradient_image(32, 67);
        let mut rng = seeded_rng(3);
        let pic = scramble_rows(&image, 8, &mut rng).unwrap();

        let heights: Vec<u32> = pic.tiles().iter().map(|t| t.pixels().height()).collect();
        assert_eq!(heights, vec![8, 8, 8, 8, 8, 8, 8, 11]);
        assert_eq!(heights.iter().sum::<u32>(), 67);
    }

    #[test]
    fn test_too_short_image_is_degenerate() {
        let image = gradient_image(32, 5);
        let mut rng = seeded_rng(4);
        let err = scramble_rows(&image, 8, &mut rng);
        assert!(matches!(err, Err(CaptchaError::GeometryDegenerate { .. })));
    }

    #[test]
    fn test_seeded_scramble_is_deterministic() {
        let image = gradient_image(48, 48);
        let first = scramble_rows(&image, 8, &mut seeded_rng(7)).unwrap();
        let second = scramble_rows(&image, 8, &mut seeded_rng(7)).unwrap();
        assert_eq!(first.tile_order(), second.tile_order());
    }
}
