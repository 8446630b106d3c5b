use image::{DynamicImage, Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tilelock::Config;

/// Opaque RGBA gradient with a distinct value at every pixel, so any
/// misplaced or turned tile changes the recomposed output.
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

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn test_config() -> Arc<Config> {
    Arc::new(Config::default())
}
