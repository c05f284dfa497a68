//! Fixed-point Rec. 709 luma.
//!
//! Weights are scaled by 4096 and truncated, the weighted sum is divided by
//! 4096 and truncated again. Integer arithmetic keeps the result identical on
//! every platform.

use crate::core::source::PixelSource;

/// Fixed-point divisor applied to the channel weights
pub const LUMA_DIVISOR: u32 = 0x1000;

/// `trunc(w * 4096)` for w = 0.2126, 0.7152, 0.0722
pub const LUMA_WEIGHTS: [u32; 3] = [870, 2929, 295];

/// Luma of a single RGB pixel
#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    let sum = wr * r as u32 + wg * g as u32 + wb * b as u32;
    // Weights sum to 4094 < 4096, so the quotient always fits in a u8
    (sum / LUMA_DIVISOR) as u8
}

/// Convert a whole source into a row-major luma plane
pub fn luma_plane<S: PixelSource + ?Sized>(source: &S) -> Vec<u8> {
    let width = source.width();
    let height = source.height();
    let mut plane = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height {
        for x in 0..width {
            plane.push(luma(source.rgb(x, y)));
        }
    }

    plane
}
