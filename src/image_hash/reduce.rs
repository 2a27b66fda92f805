//! Downsampling to the small greyscale grids the hashes are computed from.
//!
//! Both steps are pinned because they decide the hash values:
//!
//! - resampling uses the `image` crate's [`FilterType::Triangle`] (bilinear)
//!   resampler on the RGB image, to exactly `W x H`, ignoring aspect ratio;
//! - greyscale is ITU-R BT.601 luma in integer arithmetic, rounded half up:
//!   `Y = (299 R + 587 G + 114 B + 500) / 1000`.

use image::imageops::{self, FilterType};

use super::raster::RasterImage;
use crate::error::Result;

/// Resampling filter every reduction goes through.
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;
const LUMA_SCALE: u32 = LUMA_R + LUMA_G + LUMA_B;

/// BT.601 luma of an RGB triple. Grey input comes back unchanged.
#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    let weighted = LUMA_R * u32::from(r) + LUMA_G * u32::from(g) + LUMA_B * u32::from(b);
    ((weighted + LUMA_SCALE / 2) / LUMA_SCALE) as u8
}

/// `H` rows of `W` greyscale intensities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReducedGrid<const W: usize, const H: usize> {
    cells: [[u8; W]; H],
}

impl<const W: usize, const H: usize> ReducedGrid<W, H> {
    pub fn from_rows(cells: [[u8; W]; H]) -> Self {
        Self { cells }
    }

    /// Every cell set to `value`.
    pub fn uniform(value: u8) -> Self {
        Self {
            cells: [[value; W]; H],
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[[u8; W]; H] {
        &self.cells
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }
}

/// Resize `image` to `W x H` and convert it to greyscale.
///
/// Fails with `InvalidImage` before touching any pixel when the raster has
/// no area or its pixel data cannot be read.
pub fn reduce<const W: usize, const H: usize>(
    image: &impl RasterImage,
) -> Result<ReducedGrid<W, H>> {
    image.validate()?;

    let source = image.to_rgb_buffer();
    let (width, height) = source.dimensions();
    let resized = if (width as usize, height as usize) == (W, H) {
        source
    } else {
        imageops::resize(&source, W as u32, H as u32, RESIZE_FILTER)
    };

    let mut cells = [[0u8; W]; H];
    for (x, y, pixel) in resized.enumerate_pixels() {
        cells[y as usize][x as usize] = luma(pixel.0);
    }

    log::debug!("Reduced {}x{} image to {}x{} grid", width, height, W, H);
    Ok(ReducedGrid { cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

    #[test]
    fn test_luma_uses_bt601_weights() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([255, 0, 0]), 76);
        assert_eq!(luma([0, 255, 0]), 150);
        assert_eq!(luma([0, 0, 255]), 29);
        // 0.299 * 10 + 0.587 * 20 + 0.114 * 30 = 18.15
        assert_eq!(luma([10, 20, 30]), 18);
    }

    #[test]
    fn test_luma_keeps_grey_values() {
        for v in 0..=255u8 {
            assert_eq!(luma([v, v, v]), v);
        }
    }

    #[test]
    fn test_grid_of_target_size_is_copied_cell_for_cell() -> Result<()> {
        let image = GrayImage::from_fn(8, 8, |x, y| Luma([(y * 8 + x) as u8 * 3]));
        let grid = reduce::<8, 8>(&image)?;
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(grid.get(row, col), (row * 8 + col) as u8 * 3);
            }
        }
        Ok(())
    }

    #[test]
    fn test_uniform_image_reduces_to_uniform_grid() -> Result<()> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 480, Rgb([128, 128, 128])));
        assert_eq!(reduce::<8, 8>(&image)?, ReducedGrid::uniform(128));
        assert_eq!(reduce::<9, 8>(&image)?, ReducedGrid::uniform(128));
        Ok(())
    }

    #[test]
    fn test_colour_is_desaturated_after_resampling() -> Result<()> {
        let image = RgbImage::from_pixel(100, 37, Rgb([255, 0, 0]));
        assert_eq!(reduce::<8, 8>(&image)?, ReducedGrid::uniform(76));
        Ok(())
    }

    #[test]
    fn test_tiny_images_are_upsampled() -> Result<()> {
        let image = GrayImage::from_pixel(1, 1, Luma([200]));
        assert_eq!(reduce::<9, 8>(&image)?, ReducedGrid::uniform(200));
        Ok(())
    }

    #[test]
    fn test_horizontal_gradient_stays_monotonic() -> Result<()> {
        let image: GrayImage = ImageBuffer::from_fn(90, 80, |x, _| Luma([(x * 255 / 89) as u8]));
        let grid = reduce::<9, 8>(&image)?;
        for row in grid.rows() {
            assert!(row.windows(2).all(|pair| pair[1] > pair[0]), "{row:?}");
        }
        Ok(())
    }

    #[test]
    fn test_zero_width_fails_before_reduction() {
        let image = RgbImage::new(0, 16);
        let result = reduce::<8, 8>(&image);
        assert!(matches!(result, Err(Error::InvalidImage { width: 0, height: 16, .. })));
    }
}
