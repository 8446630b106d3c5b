//! Tile representation.
//!
//! One rectangular or annular region of the source picture, carrying its
//! origin in source coordinates and the rotation currently applied to it.

use image::{Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

/// Normalizes a rotation in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// One tile of a whole picture.
///
/// Pixels are stored unrotated, as the content reads in the source image;
/// `rotation` is the display rotation currently applied to the tile.
/// Annular tiles keep a full-size canvas whose alpha mask is invariant
/// under rotation about the canvas center, so rendering with any rotation
/// leaves the band in place while the content turns.
#[derive(Debug, Clone)]
pub struct Tile {
    pixels: RgbaImage,
    origin: (u32, u32),
    rotation: f64,
    centered: bool,
}

impl Tile {
    /// Creates an unrotated tile at the given source origin.
    #[must_use]
    pub fn new(pixels: RgbaImage, origin: (u32, u32)) -> Self {
        Self {
            pixels,
            origin,
            rotation: 0.0,
            centered: false,
        }
    }

    /// Creates a tile with an initial display rotation. A quarter turn
    /// rotates the whole buffer, swapping the canvas sides on non-square
    /// tiles.
    #[must_use]
    pub fn with_rotation(pixels: RgbaImage, origin: (u32, u32), rotation: f64) -> Self {
        Self {
            pixels,
            origin,
            rotation: normalize_degrees(rotation),
            centered: false,
        }
    }

    /// Creates a full-canvas annular tile anchored at the image origin.
    /// Its content rotates about the fixed canvas center and the canvas
    /// keeps its dimensions, so the alpha band never leaves its radial
    /// position.
    #[must_use]
    pub fn annular(pixels: RgbaImage, rotation: f64) -> Self {
        Self {
            pixels,
            origin: (0, 0),
            rotation: normalize_degrees(rotation),
            centered: true,
        }
    }

    /// Top-left corner of this tile's content in source coordinates.
    #[must_use]
    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    /// Display rotation in degrees, normalized into `[0, 360)`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Replaces the display rotation, normalizing modulo 360.
    pub fn set_rotation(&mut self, deg: f64) {
        self.rotation = normalize_degrees(deg);
    }

    /// Unrotated pixel content.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Renders the tile as displayed: stored pixels turned by the current
    /// rotation. Quarter turns use exact buffer transposes where the
    /// canvas may swap sides; centered tiles on non-square canvases and
    /// all other angles rotate about the canvas center with bilinear
    /// resampling. Positive degrees turn counter-clockwise.
    #[must_use]
    pub fn render(&self) -> RgbaImage {
        let deg = normalize_degrees(self.rotation);
        // Quarter-turn transposes swap the canvas sides, which a centered
        // tile must not do unless the canvas is square.
        let (width, height) = self.pixels.dimensions();
        let transposable = !self.centered || width == height;
        if deg == 0.0 {
            self.pixels.clone()
        } else if deg == 180.0 {
            imageops::rotate180(&self.pixels)
        } else if deg == 90.0 && transposable {
            imageops::rotate270(&self.pixels)
        } else if deg == 270.0 && transposable {
            imageops::rotate90(&self.pixels)
        } else {
            let theta = (-deg.to_radians()) as f32;
            rotate_about_center(&self.pixels, theta, Interpolation::Bilinear, Rgba([0, 0, 0, 0]))
        }
    }
}
