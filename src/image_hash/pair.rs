use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::fingerprint::Fingerprint;
use super::hamming::compare;
use super::raster::RasterImage;
use super::HashKind;
use crate::error::Result;

/// aHash and dHash of a single image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageFingerprints {
    pub ahash: Fingerprint,
    pub dhash: Fingerprint,
}

impl ImageFingerprints {
    /// Computes both hashes independently, in parallel.
    pub fn compute<R: RasterImage + Sync + ?Sized>(image: &R) -> Result<Self> {
        let (ahash, dhash) = rayon::join(
            || Fingerprint::average(&image),
            || Fingerprint::difference(&image),
        );
        Ok(Self {
            ahash: ahash?,
            dhash: dhash?,
        })
    }

    pub fn get(&self, kind: HashKind) -> Fingerprint {
        match kind {
            HashKind::Average => self.ahash,
            HashKind::Difference => self.dhash,
        }
    }
}

/// Fingerprints of two images and their similarity per hash kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub first: ImageFingerprints,
    pub second: ImageFingerprints,
    pub ahash_similarity: f64,
    pub dhash_similarity: f64,
}

impl ComparisonReport {
    pub fn from_fingerprints(first: ImageFingerprints, second: ImageFingerprints) -> Self {
        Self {
            first,
            second,
            ahash_similarity: compare(first.ahash, second.ahash),
            dhash_similarity: compare(first.dhash, second.dhash),
        }
    }

    pub fn similarity(&self, kind: HashKind) -> f64 {
        match kind {
            HashKind::Average => self.ahash_similarity,
            HashKind::Difference => self.dhash_similarity,
        }
    }

    /// Both hash kinds agree the images are at least `threshold` similar.
    pub fn is_duplicate(&self, threshold: f64) -> bool {
        self.ahash_similarity >= threshold && self.dhash_similarity >= threshold
    }
}

/// Fingerprints both images (four independent hashes) and scores them.
pub fn compare_images<A, B>(first: &A, second: &B) -> Result<ComparisonReport>
where
    A: RasterImage + Sync + ?Sized,
    B: RasterImage + Sync + ?Sized,
{
    let start = Instant::now();
    let (first, second) = rayon::join(
        || ImageFingerprints::compute(first),
        || ImageFingerprints::compute(second),
    );
    let report = ComparisonReport::from_fingerprints(first?, second?);
    log::debug!("Comparing image pair took {:?}", start.elapsed());
    Ok(report)
}

/// Fingerprints every image in parallel, keeping input order.
pub fn fingerprint_many<R: RasterImage + Sync>(images: &[R]) -> Vec<Result<ImageFingerprints>> {
    let start = Instant::now();
    let results: Vec<_> = images.par_iter().map(ImageFingerprints::compute).collect();
    log::debug!(
        "Fingerprinting {} images took {:?}",
        images.len(),
        start.elapsed()
    );
    results
}
