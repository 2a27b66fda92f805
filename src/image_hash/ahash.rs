use super::fingerprint::Fingerprint;
use super::raster::RasterImage;
use super::reduce::{reduce, ReducedGrid};
use crate::consts::HASH_SIZE;
use crate::error::Result;

pub type AverageGrid = ReducedGrid<HASH_SIZE, HASH_SIZE>;

/// Average hash of an 8x8 grid.
///
/// A bit is set when its cell is strictly brighter than the truncated mean of
/// all 64 cells, so a uniform grid hashes to zero.
pub fn average_hash(grid: &AverageGrid) -> Fingerprint {
    let total: u32 = grid.cells().map(u32::from).sum();
    let average = total / (HASH_SIZE * HASH_SIZE) as u32;

    Fingerprint::from_predicate(|row, col| u32::from(grid.get(row, col)) > average)
}

impl Fingerprint {
    /// Reduce `image` to 8x8 and compute its average hash.
    pub fn average(image: &impl RasterImage) -> Result<Self> {
        let grid = reduce::<HASH_SIZE, HASH_SIZE>(image)?;
        Ok(average_hash(&grid))
    }
}
