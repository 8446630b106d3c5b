//! Puzzle data model.
//!
//! A `Picture` owns the source image, its cut tiles, and the permutation
//! describing which tile occupies which display slot. Recomposition back
//! into a full-size image lives in the `recompose` submodule.

pub mod picture;
pub mod recompose;
pub mod tile;

pub use picture::Picture;
pub use tile::Tile;
