//! Read-only pixel access for the reducer.
//!
//! Decoding is someone else's job: callers hand over either an `image` crate
//! buffer or a borrowed byte slice through [`RawRaster`].

use image::{
    DynamicImage, GenericImageView, GrayImage, ImageBuffer, Pixel, Rgb, RgbImage, RgbaImage,
};

use crate::error::{Error, Result};

/// A decoded raster the fingerprint code can sample from.
///
/// Coordinates are 0-indexed with `x < width()` and `y < height()`.
pub trait RasterImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// RGB value at `(x, y)`. Greyscale sources repeat their intensity.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];

    /// Rejects rasters whose pixels cannot be read.
    fn validate(&self) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Err(Error::invalid_image(width, height, "zero area"));
        }
        Ok(())
    }

    /// Owned RGB copy used as the resampling source.
    fn to_rgb_buffer(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| Rgb(self.rgb(x, y)))
    }
}

impl RasterImage for RgbImage {
    fn width(&self) -> u32 {
        ImageBuffer::dimensions(self).0
    }

    fn height(&self) -> u32 {
        ImageBuffer::dimensions(self).1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }

    fn to_rgb_buffer(&self) -> RgbImage {
        self.clone()
    }
}

impl RasterImage for RgbaImage {
    fn width(&self) -> u32 {
        ImageBuffer::dimensions(self).0
    }

    fn height(&self) -> u32 {
        ImageBuffer::dimensions(self).1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl RasterImage for GrayImage {
    fn width(&self) -> u32 {
        ImageBuffer::dimensions(self).0
    }

    fn height(&self) -> u32 {
        ImageBuffer::dimensions(self).1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let v = self.get_pixel(x, y).0[0];
        [v, v, v]
    }
}

impl RasterImage for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::dimensions(self).0
    }

    fn height(&self) -> u32 {
        GenericImageView::dimensions(self).1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        GenericImageView::get_pixel(self, x, y).to_rgb().0
    }

    fn to_rgb_buffer(&self) -> RgbImage {
        self.to_rgb8()
    }
}

impl<R: RasterImage + ?Sized> RasterImage for &R {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        (**self).rgb(x, y)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }

    fn to_rgb_buffer(&self) -> RgbImage {
        (**self).to_rgb_buffer()
    }
}

/// Channel layout of a [`RawRaster`] buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Luma,
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Luma => 1,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// Borrowed 8-bit pixel buffer with an explicit row stride.
#[derive(Clone, Debug)]
pub struct RawRaster<'a> {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> RawRaster<'a> {
    /// Tightly packed rows.
    pub fn new(width: u32, height: u32, layout: PixelLayout, data: &'a [u8]) -> Self {
        let stride = (width as usize).saturating_mul(layout.channels());
        Self::with_stride(width, height, layout, stride, data)
    }

    pub fn with_stride(
        width: u32,
        height: u32,
        layout: PixelLayout,
        stride: usize,
        data: &'a [u8],
    ) -> Self {
        Self {
            width,
            height,
            layout,
            stride,
            data,
        }
    }

    fn row_bytes(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.layout.channels())
    }

    /// Bytes spanned from the first pixel to the end of the last row.
    fn span(&self) -> Option<usize> {
        self.stride
            .checked_mul(self.height as usize - 1)?
            .checked_add(self.row_bytes()?)
    }
}

impl<'a> RasterImage for RawRaster<'a> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = y as usize * self.stride + x as usize * self.layout.channels();
        match self.layout {
            PixelLayout::Luma => {
                let v = self.data[offset];
                [v, v, v]
            }
            PixelLayout::Rgb | PixelLayout::Rgba => [
                self.data[offset],
                self.data[offset + 1],
                self.data[offset + 2],
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_image(self.width, self.height, "zero area"));
        }
        let unavailable =
            || Error::invalid_image(self.width, self.height, "pixel data unavailable");
        let row_bytes = self.row_bytes().ok_or_else(unavailable)?;
        if self.stride < row_bytes {
            return Err(Error::invalid_image(
                self.width,
                self.height,
                "row stride shorter than a row of pixels",
            ));
        }
        match self.span() {
            Some(needed) if needed <= self.data.len() => Ok(()),
            _ => Err(unavailable()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_raw_raster_honours_stride() {
        // 2x2 RGB with two bytes of padding per row
        let data = [
            1, 2, 3, 4, 5, 6, 0, 0, //
            7, 8, 9, 10, 11, 12, 0, 0,
        ];
        let raster = RawRaster::with_stride(2, 2, PixelLayout::Rgb, 8, &data);
        assert!(raster.validate().is_ok());
        assert_eq!(raster.rgb(1, 0), [4, 5, 6]);
        assert_eq!(raster.rgb(0, 1), [7, 8, 9]);
    }

    #[test]
    fn test_raw_raster_without_enough_pixels_is_invalid() {
        let data = [0u8; 10];
        let raster = RawRaster::new(4, 4, PixelLayout::Luma, &data);
        assert!(matches!(
            raster.validate(),
            Err(Error::InvalidImage {
                width: 4,
                height: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_raw_raster_with_overflowing_stride_is_invalid() {
        let data = [0u8; 16];
        let raster = RawRaster::with_stride(1, 3, PixelLayout::Luma, usize::MAX / 2 + 1, &data);
        assert!(matches!(
            raster.validate(),
            Err(Error::InvalidImage {
                width: 1,
                height: 3,
                ..
            })
        ));
        assert!(matches!(
            crate::image_hash::Fingerprint::average(&raster),
            Err(Error::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_raw_raster_with_short_stride_is_invalid() {
        let data = [0u8; 64];
        let raster = RawRaster::with_stride(4, 4, PixelLayout::Rgb, 4, &data);
        assert!(raster.validate().is_err());
    }

    #[test]
    fn test_luma_sources_repeat_intensity() {
        let gray = GrayImage::from_pixel(3, 3, Luma([42]));
        assert_eq!(gray.rgb(2, 2), [42, 42, 42]);

        let data = [9u8, 200];
        let raster = RawRaster::new(2, 1, PixelLayout::Luma, &data);
        assert_eq!(raster.rgb(1, 0), [200, 200, 200]);
    }

    #[test]
    fn test_zero_area_is_invalid() {
        let empty = RgbImage::new(0, 10);
        assert!(matches!(
            empty.validate(),
            Err(Error::InvalidImage { width: 0, .. })
        ));
        let dynamic = DynamicImage::ImageRgb8(RgbImage::new(10, 0));
        assert!(dynamic.validate().is_err());
    }
}
