//! # Hasher Module
//!
//! Computes DCT perceptual hashes.
//!
//! ## How It Works
//! 1. Convert to fixed-point luma and stretch to N x N (default 32)
//! 2. Separable 2D DCT-II, keep the 8 x 8 lowest frequencies
//! 3. Set one bit per coefficient that exceeds the mean of the 63 AC terms
//! 4. Compare hashes using Hamming distance
//!
//! Hashes are only comparable when computed with the same configuration.
//!
//! ## Example
//! ```rust,ignore
//! use dct_phash::core::hasher::HasherConfig;
//! use dct_phash::core::transform::ExecutionStrategy;
//!
//! let hasher = HasherConfig::new()
//!     .strategy(ExecutionStrategy::Parallel)
//!     .build()?;
//!
//! let hash = hasher.hash_file(&path)?;
//! println!("{}", hash); // 16 uppercase hex digits
//! ```

pub mod decode;
mod generate;
mod value;

pub use generate::{generate_hash, pack_bits};
pub use value::ImageHash;

use crate::core::preprocess::{GrayBuffer, Preprocessor, ResampleFilter};
use crate::core::source::PixelSource;
use crate::core::transform::{
    CoefficientBlock, ExecutionStrategy, Normalization, TransformEngine, DEFAULT_DCT_SIZE,
};
use crate::error::Result;
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// Configuration builder for hashers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasherConfig {
    /// Edge length N of the grayscale buffer and the DCT
    dct_size: u32,
    /// Resampling kernel used by the preprocessor
    filter: ResampleFilter,
    /// Scheduling of the per-row transforms
    strategy: ExecutionStrategy,
    /// DCT output scaling
    normalization: Normalization,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            dct_size: DEFAULT_DCT_SIZE,
            filter: ResampleFilter::default(),
            strategy: ExecutionStrategy::default(),
            normalization: Normalization::default(),
        }
    }

    /// Set the DCT size N (8-1024, default 32)
    ///
    /// Changing N changes every hash; never mix hashes from different sizes.
    pub fn dct_size(mut self, size: u32) -> Self {
        self.dct_size = size;
        self
    }

    /// Set the resampling kernel
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set serial or row-parallel execution of the transform
    pub fn strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the DCT normalization
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Build the hasher, validating the DCT size
    pub fn build(self) -> Result<PerceptualHasher> {
        let engine = TransformEngine::with_options(self.dct_size, self.strategy, self.normalization)?;
        Ok(PerceptualHasher {
            preprocessor: Preprocessor::new(self.dct_size, self.filter),
            engine,
        })
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Preprocessor, transform engine and hash generator wired together
#[derive(Debug, Clone)]
pub struct PerceptualHasher {
    preprocessor: Preprocessor,
    engine: TransformEngine,
}

impl PerceptualHasher {
    /// Hasher with the default configuration (N = 32, Catmull-Rom, serial)
    pub fn new() -> Self {
        Self {
            preprocessor: Preprocessor::new(DEFAULT_DCT_SIZE, ResampleFilter::default()),
            engine: TransformEngine::from_parts(
                DEFAULT_DCT_SIZE,
                ExecutionStrategy::default(),
                Normalization::default(),
            ),
        }
    }

    pub fn dct_size(&self) -> u32 {
        self.engine.size()
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.engine.strategy()
    }

    /// First stage only: the N x N grayscale buffer
    pub fn preprocess<S: PixelSource + ?Sized>(&self, source: &S) -> Result<GrayBuffer> {
        Ok(self.preprocessor.preprocess(source)?)
    }

    /// Second stage only: the 8 x 8 coefficient block
    pub fn transform(&self, buffer: &GrayBuffer) -> Result<CoefficientBlock> {
        Ok(self.engine.transform(buffer)?)
    }

    /// Run the whole pipeline on one source
    pub fn compute_hash<S: PixelSource + ?Sized>(&self, source: &S) -> Result<ImageHash> {
        let buffer = self.preprocess(source)?;
        let coefficients = self.transform(&buffer)?;
        let hash = generate_hash(&coefficients);

        debug!(
            width = source.width(),
            height = source.height(),
            dct_size = self.engine.size(),
            hash = %hash,
            "computed perceptual hash"
        );

        Ok(hash)
    }

    /// Decode the file at `path` and hash it
    pub fn hash_file(&self, path: &Path) -> Result<ImageHash> {
        let image = decode::open_image(path)?;
        self.compute_hash(&image)
    }

    /// Hash many sources on the rayon pool. Results keep input order.
    pub fn hash_batch<S: PixelSource + Sync>(&self, sources: &[S]) -> Vec<Result<ImageHash>> {
        debug!(count = sources.len(), "hashing batch");
        sources
            .par_iter()
            .map(|source| self.compute_hash(source))
            .collect()
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new()
    }
}
