pub mod ahash;
pub mod dhash;
pub mod fingerprint;
pub mod hamming;
pub mod pair;
pub mod raster;
pub mod reduce;


use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use self::fingerprint::Fingerprint;
pub use self::hamming::{compare, hamming_distance};
pub use self::pair::{compare_images, fingerprint_many, ComparisonReport, ImageFingerprints};
pub use self::raster::{PixelLayout, RasterImage, RawRaster};
pub use self::reduce::{reduce, ReducedGrid};

/// The two fingerprint algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    /// Bits mark cells brighter than the grid mean
    Average,
    /// Bits mark cells brighter than their left neighbour
    Difference,
}

impl HashKind {
    pub const ALL: [HashKind; 2] = [HashKind::Average, HashKind::Difference];

    pub fn name(self) -> &'static str {
        match self {
            HashKind::Average => "aHash",
            HashKind::Difference => "dHash",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fingerprint `image` with the algorithm `kind` selects.
pub fn fingerprint(image: &impl RasterImage, kind: HashKind) -> Result<Fingerprint> {
    match kind {
        HashKind::Average => Fingerprint::average(image),
        HashKind::Difference => Fingerprint::difference(image),
    }
}
