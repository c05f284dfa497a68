//! Resampling of the luma plane to the square working size.
//!
//! Uses fast_image_resize, whose 8-bit convolution runs on fixed-point
//! coefficients: the SIMD paths (AVX2/SSE4.1/NEON) and the scalar fallback
//! produce the same bytes for a given filter.

use crate::error::PreprocessError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use serde::{Deserialize, Serialize};

/// Convolution kernel used to stretch the luma plane to N x N
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Triangle kernel, radius 1
    Bilinear,
    /// Cubic kernel with B = 0, C = 0.5, radius 2
    #[default]
    CatmullRom,
    /// Cubic kernel with B = C = 1/3, radius 2
    Mitchell,
    /// Windowed sinc, radius 3
    Lanczos3,
}

impl ResampleFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Bilinear => FilterType::Bilinear,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Mitchell => FilterType::Mitchell,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleFilter::Bilinear => write!(f, "bilinear"),
            ResampleFilter::CatmullRom => write!(f, "catmull-rom"),
            ResampleFilter::Mitchell => write!(f, "mitchell"),
            ResampleFilter::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

/// Stretch a `width x height` single-channel plane to `size x size`.
///
/// A plane that is already `size x size` is returned untouched.
pub fn resize_plane(
    plane: Vec<u8>,
    width: u32,
    height: u32,
    size: u32,
    filter: ResampleFilter,
) -> Result<Vec<u8>, PreprocessError> {
    resize_plane_with(&mut Resizer::new(), plane, width, height, size, filter)
}

fn resize_plane_with(
    resizer: &mut Resizer,
    plane: Vec<u8>,
    width: u32,
    height: u32,
    size: u32,
    filter: ResampleFilter,
) -> Result<Vec<u8>, PreprocessError> {
    if width == 0 || height == 0 {
        return Err(PreprocessError::InvalidInput { width, height });
    }

    if size == 0 {
        return Err(PreprocessError::ResizeFailed(
            "target size must be non-zero".to_string(),
        ));
    }

    if width == size && height == size {
        return Ok(plane);
    }

    let src_image = Image::from_vec_u8(width, height, plane, PixelType::U8).map_err(|e| {
        PreprocessError::ResizeFailed(format!("failed to create source image: {}", e))
    })?;

    let mut dst_image = Image::new(size, size, PixelType::U8);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter.filter_type()));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| PreprocessError::ResizeFailed(e.to_string()))?;

    Ok(dst_image.into_vec())
}
