//! # dct-phash
//!
//! Deterministic DCT-based perceptual hashing ("pHash") for near-duplicate
//! image detection.
//!
//! ## Pipeline
//! raw pixels → grayscale N x N → 2D DCT-II → 8 x 8 low frequencies →
//! 64-bit hash → 16 uppercase hex digits
//!
//! Two hashes are compared by Hamming distance: 0 means the same low-frequency
//! structure, 64 means every bit differs. Identical pixels always give the
//! identical hash, on any machine, so hashes can serve as dedup keys.
//!
//! ## Architecture
//! - `core` - The hashing engine (no I/O apart from optional file decoding)
//! - `error` - Error types for each stage
//!
//! ## Example
//! ```rust,ignore
//! let image = image::open("photo.jpg")?;
//! let a = dct_phash::compute_hash(&image)?;
//! let d = dct_phash::distance(&a.to_hex(), "C3F0E1A0B0C0D0E0")?;
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::comparator::distance;
pub use crate::core::hasher::{HasherConfig, ImageHash, PerceptualHasher};
pub use crate::core::source::PixelSource;
pub use error::{PhashError, Result};

/// Hash `source` with the default configuration (N = 32)
pub fn compute_hash<S: PixelSource + ?Sized>(source: &S) -> Result<ImageHash> {
    PerceptualHasher::new().compute_hash(source)
}

/// Initialize tracing for the library
///
/// This should be called by the application entry point. The filter is read
/// from `RUST_LOG`.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
