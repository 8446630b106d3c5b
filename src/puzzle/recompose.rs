//! Recomposition.
//!
//! Rebuilds one full-size image from a picture's current arrangement. For
//! each display slot the tile currently occupying it is rendered (its
//! outstanding rotation applied) and placed at the origin belonging to the
//! slot's own tile-id. Only an identity order with zero rotations
//! reproduces the source image.

use crate::puzzle::picture::Picture;
use crate::scramble::Scheme;
use image::{DynamicImage, RgbaImage, imageops};

impl Picture {
    /// Composes the current arrangement into one full-size image.
    ///
    /// Rows and grid tiles are opaque and overlay the canvas directly.
    /// Ring tiles only cover a partial annulus, so they alpha-composite
    /// over the accumulating canvas: background ring first, then the
    /// annuli from outermost to innermost. The result is converted back to
    /// the source image's color mode.
    #[must_use]
    pub fn recompose(&self) -> DynamicImage {
        let (width, height) = (self.source().width(), self.source().height());
        let mut canvas = RgbaImage::new(width, height);

        for slot in self.compose_order() {
            let tile_id = self.tile_order()[slot];
            let rendered = self.tiles()[tile_id].render();
            let (x, y) = self.tiles()[slot].origin();
            imageops::overlay(&mut canvas, &rendered, i64::from(x), i64::from(y));
        }

        self.into_source_mode(canvas)
    }

    fn compose_order(&self) -> Vec<usize> {
        let slots = self.tile_order().len();
        match self.scheme() {
            Scheme::Rows | Scheme::Grid => (0..slots).collect(),
            // Background first, then annuli outermost to innermost so no
            // transparent region overwrites already-placed content.
            Scheme::Rings => std::iter::once(0).chain((1..slots).rev()).collect(),
        }
    }

    fn into_source_mode(&self, canvas: RgbaImage) -> DynamicImage {
        let composed = DynamicImage::ImageRgba8(canvas);
        match self.source() {
            DynamicImage::ImageRgba8(_) => composed,
            DynamicImage::ImageRgb8(_) => DynamicImage::ImageRgb8(composed.into_rgb8()),
            DynamicImage::ImageLuma8(_) => DynamicImage::ImageLuma8(composed.into_luma8()),
            DynamicImage::ImageLumaA8(_) => DynamicImage::ImageLumaA8(composed.into_luma_alpha8()),
            _ => composed,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::puzzle::{Picture, Tile};
    use crate::scramble::Scheme;
    use image::{DynamicImage, Rgba, RgbaImage, imageops};

    /// Two stacked 4x2 strips with distinct colors.
    fn two_strip_picture(order: Vec<usize>) -> Picture {
        let top = Rgba([200, 0, 0, 255]);
        let bottom = Rgba([0, 0, 200, 255]);
        let source = RgbaImage::from_fn(4, 4, |_, y| if y < 2 { top } else { bottom });

        let tiles = vec![
            Tile::new(imageops::crop_imm(&source, 0, 0, 4, 2).to_image(), (0, 0)),
            Tile::new(imageops::crop_imm(&source, 0, 2, 4, 2).to_image(), (0, 2)),
        ];
        Picture::new(DynamicImage::ImageRgba8(source), Scheme::Rows, tiles, order).unwrap()
    }

    #[test]
    fn test_identity_reproduces_source() {
        let pic = two_strip_picture(vec![0, 1]);
        assert_eq!(pic.recompose().to_rgba8(), pic.source().to_rgba8());
    }

    #[test]
    fn test_swapped_order_moves_strips() {
        let pic = two_strip_picture(vec![1, 0]);
        let composed = pic.recompose().to_rgba8();
        // Slot 0 (top of the canvas) now shows tile 1's blue content.
        assert_eq!(composed.get_pixel(0, 0), &Rgba([0, 0, 200, 255]));
        assert_eq!(composed.get_pixel(0, 3), &Rgba([200, 0, 0, 255]));
        assert_ne!(composed, pic.source().to_rgba8());
    }

    #[test]
    fn test_output_matches_source_mode() {
        let source = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 4, image::Rgb([9, 9, 9])));
        let rgba = source.to_rgba8();
        let tiles = vec![
            Tile::new(imageops::crop_imm(&rgba, 0, 0, 4, 2).to_image(), (0, 0)),
            Tile::new(imageops::crop_imm(&rgba, 0, 2, 4, 2).to_image(), (0, 2)),
        ];
        let pic = Picture::new(source, Scheme::Rows, tiles, vec![0, 1]).unwrap();
        assert!(matches!(pic.recompose(), DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_out_of_range_rotation_is_normalized() {
        let mut pic = two_strip_picture(vec![0, 1]);
        pic.set_rotation(0, 720.0).unwrap();
        assert_eq!(pic.recompose().to_rgba8(), pic.source().to_rgba8());
    }
}
