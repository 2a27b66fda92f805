//! Perceptual image fingerprints.
//!
//! Images are reduced to small greyscale grids and packed into 64-bit
//! fingerprints, either by average threshold (aHash, 8x8 grid) or by
//! left-neighbour gradient (dHash, 9x8 grid). Two fingerprints of the same
//! kind are compared by Hamming distance, normalised to a similarity score in
//! `[0.0, 1.0]`.
//!
//! ```no_run
//! use calc_image_hash::image_hash::compare_images;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let first = image::open("first.jpg")?;
//! let second = image::open("second.jpg")?;
//! let report = compare_images(&first, &second)?;
//! println!("aHash1 = {}", report.first.ahash);
//! println!("aHash = {} dHash = {}", report.ahash_similarity, report.dhash_similarity);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod image_hash;

pub use crate::error::{Error, Result};
pub use crate::image_hash::{
    compare, compare_images, fingerprint, Fingerprint, HashKind, ImageFingerprints, RasterImage,
};
