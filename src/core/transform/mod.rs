//! # Transform Engine
//!
//! Separable 2D DCT-II over the N x N grayscale buffer, cropped to the
//! 8 x 8 lowest-frequency block.
//!
//! ## Steps
//! 1. Widen the 8-bit buffer to `f64`
//! 2. DCT-II every row
//! 3. Transpose
//! 4. DCT-II every row again (the columns of step 2)
//! 5. Keep `[0..8) x [0..8)` of the result, row-major
//!
//! The result of step 4 is left in transposed orientation: block row `i`
//! holds horizontal frequency `i`. Hash bit order depends on this.
//!
//! Rows are independent, so both passes can run on the rayon pool
//! ([`ExecutionStrategy::Parallel`]). Each row is computed by the same code
//! either way, so the output is bit-identical across strategies.

pub mod dct;

pub use dct::{Dct2, Normalization};

use crate::core::preprocess::GrayBuffer;
use crate::error::{PhashError, TransformError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Edge length of the retained low-frequency block
pub const BLOCK_SIZE: usize = 8;

/// Number of coefficients in a [`CoefficientBlock`]
pub const COEFFICIENT_COUNT: usize = BLOCK_SIZE * BLOCK_SIZE;

/// Default DCT size N
pub const DEFAULT_DCT_SIZE: u32 = 32;

/// Smallest N that still contains an 8 x 8 block
pub const MIN_DCT_SIZE: u32 = BLOCK_SIZE as u32;

/// Largest accepted N
pub const MAX_DCT_SIZE: u32 = 1024;

/// How the per-row 1D transforms are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    /// One row after another on the calling thread
    #[default]
    Serial,
    /// Rows spread across the rayon thread pool
    Parallel,
}

/// The 64 lowest-frequency DCT coefficients, row-major, DC first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientBlock([f64; COEFFICIENT_COUNT]);

impl CoefficientBlock {
    pub fn new(values: [f64; COEFFICIENT_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The DC (average brightness) term
    pub fn dc(&self) -> f64 {
        self.0[0]
    }

    /// Coefficient at block position (`row`, `col`)
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= BLOCK_SIZE || col >= BLOCK_SIZE {
            return None;
        }
        Some(self.0[row * BLOCK_SIZE + col])
    }
}

/// Separable 2D DCT-II for a fixed N
#[derive(Debug, Clone)]
pub struct TransformEngine {
    size: u32,
    strategy: ExecutionStrategy,
    dct: Dct2,
}

impl TransformEngine {
    /// Serial, unnormalized engine for N = `size`
    pub fn new(size: u32) -> Result<Self, PhashError> {
        Self::with_options(size, ExecutionStrategy::default(), Normalization::default())
    }

    /// Engine with explicit scheduling and normalization.
    ///
    /// `size` must lie in `MIN_DCT_SIZE..=MAX_DCT_SIZE`.
    pub fn with_options(
        size: u32,
        strategy: ExecutionStrategy,
        normalization: Normalization,
    ) -> Result<Self, PhashError> {
        if !(MIN_DCT_SIZE..=MAX_DCT_SIZE).contains(&size) {
            return Err(PhashError::Config(format!(
                "DCT size {} out of range ({}-{})",
                size, MIN_DCT_SIZE, MAX_DCT_SIZE
            )));
        }
        Ok(Self::from_parts(size, strategy, normalization))
    }

    pub(crate) fn from_parts(
        size: u32,
        strategy: ExecutionStrategy,
        normalization: Normalization,
    ) -> Self {
        Self {
            size,
            strategy,
            dct: Dct2::new(size as usize, normalization),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    pub fn normalization(&self) -> Normalization {
        self.dct.normalization()
    }

    /// Full N x N transform, in the orientation described in the module docs
    pub fn full_transform(&self, buffer: &GrayBuffer) -> Result<Vec<f64>, TransformError> {
        if buffer.width() != self.size || buffer.height() != self.size {
            return Err(TransformError::DimensionMismatch {
                expected: self.size,
                width: buffer.width(),
                height: buffer.height(),
            });
        }

        let n = self.size as usize;
        trace!(size = n, strategy = ?self.strategy, "applying 2D DCT-II");

        let input: Vec<f64> = buffer.pixels().iter().map(|&p| f64::from(p)).collect();
        let mut rows = vec![0.0; n * n];
        self.rows_pass(&input, &mut rows);

        let mut transposed = vec![0.0; n * n];
        dct::transpose(&rows, &mut transposed, n, n);

        self.rows_pass(&transposed, &mut rows);
        Ok(rows)
    }

    /// Transform and crop to the 8 x 8 low-frequency block
    pub fn transform(&self, buffer: &GrayBuffer) -> Result<CoefficientBlock, TransformError> {
        let full = self.full_transform(buffer)?;
        let n = self.size as usize;

        let mut block = [0.0; COEFFICIENT_COUNT];
        for (row, out) in block.chunks_exact_mut(BLOCK_SIZE).enumerate() {
            out.copy_from_slice(&full[row * n..row * n + BLOCK_SIZE]);
        }

        Ok(CoefficientBlock(block))
    }

    fn rows_pass(&self, input: &[f64], output: &mut [f64]) {
        let n = self.size as usize;
        match self.strategy {
            ExecutionStrategy::Serial => input
                .chunks_exact(n)
                .zip(output.chunks_exact_mut(n))
                .for_each(|(row_in, row_out)| self.dct.transform(row_in, row_out)),
            ExecutionStrategy::Parallel => input
                .par_chunks_exact(n)
                .zip(output.par_chunks_exact_mut(n))
                .for_each(|(row_in, row_out)| self.dct.transform(row_in, row_out)),
        }
    }
}
