//! # Core Module
//!
//! The perceptual hashing engine. Leaves first:
//!
//! ## Modules
//! - `source` - Pixel access the caller supplies
//! - `preprocess` - Fixed-point luma and resize to N x N
//! - `transform` - Separable 2D DCT-II, cropped to 8 x 8
//! - `hasher` - Bit generation, the hash value, and the composed pipeline
//! - `comparator` - Hamming distance between hash strings

pub mod comparator;
pub mod hasher;
pub mod preprocess;
pub mod source;
pub mod transform;

// Re-export commonly used types
pub use comparator::{distance, MatchType};
pub use hasher::{HasherConfig, ImageHash, PerceptualHasher};
pub use preprocess::{GrayBuffer, ResampleFilter};
pub use source::{PixelLayout, PixelSource, RawPixels};
pub use transform::{CoefficientBlock, ExecutionStrategy, Normalization};
