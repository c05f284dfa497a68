//! # phash CLI
//!
//! Command-line interface for the perceptual hasher.
//!
//! ## Usage
//! ```bash
//! phash hash ~/Photos/a.jpg ~/Photos/b.png
//! phash distance C3F0E1A0B0C0D0E0 C3F0E1A0B0C0D0E1
//! phash compare a.jpg b.jpg --threshold 8 --output json
//! ```

mod cli;

use dct_phash::Result;

fn main() -> Result<()> {
    dct_phash::init_tracing();
    cli::run()
}
