//! # Preprocessor
//!
//! Turns an arbitrary-size colour image into an N x N grayscale buffer.
//!
//! ## How It Works
//! 1. Convert every pixel to fixed-point luma (see [`luma`])
//! 2. Stretch the luma plane to exactly N x N with a convolution kernel
//!    (Catmull-Rom bicubic by default)
//!
//! The aspect ratio is not preserved. Only coarse low-frequency structure
//! survives the later transform, so the distortion is harmless as long as
//! every image goes through the same path.

pub mod luma;
pub mod resample;

pub use resample::ResampleFilter;

use crate::core::source::PixelSource;
use crate::error::PreprocessError;
use tracing::trace;

/// Owned row-major 8-bit intensity buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GrayBuffer {
    /// Wrap raw intensities. Returns `None` if `pixels.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Intensity at (`x`, `y`)
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Luma conversion plus resize to a fixed square size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessor {
    size: u32,
    filter: ResampleFilter,
}

impl Preprocessor {
    pub fn new(size: u32, filter: ResampleFilter) -> Self {
        Self { size, filter }
    }

    /// Target edge length N
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }

    /// Produce the N x N grayscale buffer for `source`
    pub fn preprocess<S: PixelSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<GrayBuffer, PreprocessError> {
        let width = source.width();
        let height = source.height();

        if width == 0 || height == 0 {
            return Err(PreprocessError::InvalidInput { width, height });
        }

        trace!(width, height, size = self.size, filter = %self.filter, "preprocessing");

        let plane = luma::luma_plane(source);
        let pixels = resample::resize_plane(plane, width, height, self.size, self.filter)?;

        GrayBuffer::from_raw(self.size, self.size, pixels).ok_or_else(|| {
            PreprocessError::ResizeFailed("resized plane has unexpected length".to_string())
        })
    }
}

/// Preprocess with the default Catmull-Rom kernel
pub fn preprocess<S: PixelSource + ?Sized>(
    source: &S,
    size: u32,
) -> Result<GrayBuffer, PreprocessError> {
    Preprocessor::new(size, ResampleFilter::default()).preprocess(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::{PixelLayout, RawPixels};
    use image::{Rgb, RgbImage};

    #[test]
    fn zero_width_is_invalid_input() {
        let pixels = RawPixels::new(&[], 0, 10, PixelLayout::Rgb8).unwrap();
        let result = preprocess(&pixels, 32);

        assert_eq!(
            result,
            Err(PreprocessError::InvalidInput {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn zero_height_is_invalid_input() {
        let image = RgbImage::new(10, 0);
        assert!(matches!(
            preprocess(&image, 32),
            Err(PreprocessError::InvalidInput { .. })
        ));
    }

    #[test]
    fn output_is_always_square() {
        let image = RgbImage::from_fn(120, 45, |x, y| Rgb([x as u8, y as u8, 0]));
        let buffer = preprocess(&image, 32).unwrap();

        assert_eq!(buffer.width(), 32);
        assert_eq!(buffer.height(), 32);
        assert_eq!(buffer.pixels().len(), 1024);
    }

    #[test]
    fn exact_size_source_is_only_converted() {
        let image = RgbImage::from_fn(32, 32, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 77]));
        let buffer = preprocess(&image, 32).unwrap();

        assert_eq!(buffer.pixels(), luma::luma_plane(&image).as_slice());
    }

    #[test]
    fn white_source_stays_near_white() {
        let image = RgbImage::from_pixel(300, 200, Rgb([255, 255, 255]));
        let buffer = preprocess(&image, 32).unwrap();

        assert!(buffer.pixels().iter().all(|&p| (p as i16 - 254).abs() <= 1));
    }

    #[test]
    fn custom_size_is_honoured() {
        let image = RgbImage::from_pixel(64, 64, Rgb([10, 20, 30]));
        let buffer = Preprocessor::new(16, ResampleFilter::Bilinear)
            .preprocess(&image)
            .unwrap();

        assert_eq!(buffer.width(), 16);
    }

    #[test]
    fn gray_buffer_checks_length() {
        assert!(GrayBuffer::from_raw(4, 4, vec![0; 15]).is_none());

        let buffer = GrayBuffer::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.get(1, 1), Some(4));
        assert_eq!(buffer.get(2, 0), None);
    }
}
