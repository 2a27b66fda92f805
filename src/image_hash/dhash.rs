use super::fingerprint::Fingerprint;
use super::raster::RasterImage;
use super::reduce::{reduce, ReducedGrid};
use crate::consts::{DHASH_WIDTH, HASH_SIZE};
use crate::error::Result;

pub type DifferenceGrid = ReducedGrid<DHASH_WIDTH, HASH_SIZE>;

/// Difference hash of a 9x8 grid.
///
/// The bit for `(row, col)` is set when cell `col + 1` of that row is strictly
/// brighter than its left neighbour `col`.
pub fn difference_hash(grid: &DifferenceGrid) -> Fingerprint {
    Fingerprint::from_predicate(|row, col| grid.get(row, col + 1) > grid.get(row, col))
}

impl Fingerprint {
    /// Reduce `image` to 9x8 and compute its difference hash.
    pub fn difference(image: &impl RasterImage) -> Result<Self> {
        let grid = reduce::<DHASH_WIDTH, HASH_SIZE>(image)?;
        Ok(difference_hash(&grid))
    }
}
