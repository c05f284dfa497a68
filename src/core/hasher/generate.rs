//! Threshold DCT coefficients into hash bits.

use super::value::ImageHash;
use crate::core::transform::{CoefficientBlock, COEFFICIENT_COUNT};

/// Hash a 64-coefficient block
pub fn generate_hash(coefficients: &CoefficientBlock) -> ImageHash {
    ImageHash::from_u64(pack_bits(coefficients.as_slice()))
}

/// Pack one bit per coefficient, first coefficient most significant.
///
/// The threshold is the mean of every coefficient except the first (DC)
/// term. The DC term itself still gets a bit, compared against that same
/// mean. At most 64 coefficients are used; with fewer than two there is no
/// AC mean and the result is 0.
pub fn pack_bits(coefficients: &[f64]) -> u64 {
    let coefficients = &coefficients[..coefficients.len().min(COEFFICIENT_COUNT)];
    let Some((_, ac)) = coefficients.split_first() else {
        return 0;
    };
    if ac.is_empty() {
        return 0;
    }

    let mean = ac.iter().sum::<f64>() / ac.len() as f64;

    coefficients
        .iter()
        .fold(0u64, |bits, &c| (bits << 1) | u64::from(c > mean))
}
