//! One-dimensional DCT-II with a precomputed cosine table.
//!
//! `X[k] = s(k) * sum_n x[n] * cos(pi / N * (n + 1/2) * k)`
//!
//! where `s(k) = 1` when unnormalized, and `sqrt(1/N)` for k = 0 or
//! `sqrt(2/N)` otherwise when orthonormal.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Scaling applied to the DCT-II output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// Plain cosine sums, no scaling
    #[default]
    Unnormalized,
    /// Orthonormal basis. Row and column 0 are scaled differently from the
    /// rest, so hash bits may differ from the unnormalized transform.
    Orthonormal,
}

/// A DCT-II of fixed length, ready to be applied to many rows
#[derive(Debug, Clone)]
pub struct Dct2 {
    size: usize,
    normalization: Normalization,
    /// Row k holds the basis vector for output k
    table: Vec<f64>,
}

impl Dct2 {
    pub fn new(size: usize, normalization: Normalization) -> Self {
        let mut table = Vec::with_capacity(size * size);

        for k in 0..size {
            let scale = match normalization {
                Normalization::Unnormalized => 1.0,
                Normalization::Orthonormal if k == 0 => (1.0 / size as f64).sqrt(),
                Normalization::Orthonormal => (2.0 / size as f64).sqrt(),
            };
            for n in 0..size {
                let angle = PI / size as f64 * (n as f64 + 0.5) * k as f64;
                table.push(scale * angle.cos());
            }
        }

        Self {
            size,
            normalization,
            table,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Transform `input` into `output`. Both slices hold `size` values.
    pub fn transform(&self, input: &[f64], output: &mut [f64]) {
        debug_assert_eq!(input.len(), self.size);
        debug_assert_eq!(output.len(), self.size);

        for (out, basis) in output.iter_mut().zip(self.table.chunks_exact(self.size)) {
            *out = basis.iter().zip(input).map(|(c, x)| c * x).sum();
        }
    }
}

/// Transpose a row-major `rows x cols` matrix into `dst` (`cols x rows`)
pub fn transpose(src: &[f64], dst: &mut [f64], rows: usize, cols: usize) {
    debug_assert_eq!(src.len(), rows * cols);
    debug_assert_eq!(dst.len(), rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            dst[c * rows + r] = src[r * cols + c];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_input_has_only_dc() {
        let dct = Dct2::new(8, Normalization::Unnormalized);
        let input = [3.0; 8];
        let mut output = [0.0; 8];
        dct.transform(&input, &mut output);

        assert!((output[0] - 24.0).abs() < 1e-9);
        assert!(output[1..].iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn orthonormal_preserves_energy() {
        let dct = Dct2::new(16, Normalization::Orthonormal);
        let input: Vec<f64> = (0..16).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();
        let mut output = vec![0.0; 16];
        dct.transform(&input, &mut output);

        let energy_in: f64 = input.iter().map(|v| v * v).sum();
        let energy_out: f64 = output.iter().map(|v| v * v).sum();
        assert!((energy_in - energy_out).abs() < 1e-9);
    }

    #[test]
    fn matches_direct_formula() {
        let n = 5;
        let dct = Dct2::new(n, Normalization::Unnormalized);
        let input = [1.0, -2.0, 0.5, 4.0, 3.0];
        let mut output = [0.0; 5];
        dct.transform(&input, &mut output);

        for (k, value) in output.iter().enumerate() {
            let expected: f64 = input
                .iter()
                .enumerate()
                .map(|(i, x)| x * (PI / n as f64 * (i as f64 + 0.5) * k as f64).cos())
                .sum();
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn transpose_swaps_axes() {
        let src = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut dst = [0.0; 6];
        transpose(&src, &mut dst, 2, 3);

        assert_eq!(dst, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }
}
