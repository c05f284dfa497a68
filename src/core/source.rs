//! Pixel sources accepted by the preprocessor.
//!
//! The pipeline never decodes files itself; callers hand it anything that can
//! report its dimensions and the 8-bit RGB value of a pixel. Alpha, when
//! present, is ignored.

use crate::error::PreprocessError;
use image::{DynamicImage, GenericImageView, ImageBuffer, RgbImage, RgbaImage};

/// Read-only access to the pixels of a colour image
pub trait PixelSource {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Red, green and blue channels of the pixel at (`x`, `y`).
    ///
    /// Callers only ask for coordinates inside `width() x height()`.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        (**self).rgb(x, y)
    }
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = GenericImageView::get_pixel(self, x, y).0;
        [r, g, b]
    }
}

/// Byte layout of an interleaved 8-bit pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// R, G, B
    Rgb8,
    /// R, G, B, A
    Rgba8,
    /// X, R, G, B with a leading padding or alpha byte that is skipped
    Xrgb8,
    /// Single intensity channel, replicated into R, G and B
    Gray8,
}

impl PixelLayout {
    /// Number of bytes one pixel occupies
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 | PixelLayout::Xrgb8 => 4,
            PixelLayout::Gray8 => 1,
        }
    }

    /// Offsets of the R, G and B bytes within one pixel
    const fn rgb_offsets(self) -> [usize; 3] {
        match self {
            PixelLayout::Rgb8 | PixelLayout::Rgba8 => [0, 1, 2],
            PixelLayout::Xrgb8 => [1, 2, 3],
            PixelLayout::Gray8 => [0, 0, 0],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PixelLayout::Rgb8 => "RGB8",
            PixelLayout::Rgba8 => "RGBA8",
            PixelLayout::Xrgb8 => "XRGB8",
            PixelLayout::Gray8 => "Gray8",
        }
    }
}

impl std::fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed, tightly packed, row-major pixel buffer
#[derive(Debug, Clone, Copy)]
pub struct RawPixels<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl<'a> RawPixels<'a> {
    /// Wrap `data` as a `width x height` image in the given layout.
    ///
    /// Fails when the slice length does not match the declared dimensions.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, PreprocessError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(layout.bytes_per_pixel()));

        match expected {
            Some(expected) if expected == data.len() => Ok(Self {
                data,
                width,
                height,
                layout,
            }),
            _ => Err(PreprocessError::InvalidLayout {
                layout: layout.name(),
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            }),
        }
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }
}

impl PixelSource for RawPixels<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let bpp = self.layout.bytes_per_pixel();
        let base = (y as usize * self.width as usize + x as usize) * bpp;
        let [r, g, b] = self.layout.rgb_offsets();
        [
            self.data[base + r],
            self.data[base + g],
            self.data[base + b],
        ]
    }
}
