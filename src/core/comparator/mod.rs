//! # Comparator Module
//!
//! Hamming distance between hash strings, plus optional caller-side
//! classification of the resulting distance.
//!
//! ## Distance Classes
//! | Distance | Classification |
//! |----------|---------------|
//! | 0        | Exact match   |
//! | 1-4      | Near-exact    |
//! | 5-10     | Similar       |
//! | 11+      | Different     |
//!
//! The classes are a convention. [`distance`] only ever returns the raw count.

use crate::core::hasher::ImageHash;
use crate::error::HashParseError;
use serde::{Deserialize, Serialize};

/// Distance at or below which two images are usually treated as the same picture
pub const DEFAULT_SIMILARITY_THRESHOLD: u32 = 10;

/// Hamming distance between two hex-encoded hashes.
///
/// Fails with `MalformedHash` if either string is not a base-16 value of at
/// most 64 bits.
pub fn distance(a: &str, b: &str) -> Result<u32, HashParseError> {
    let a = ImageHash::from_hex(a)?;
    let b = ImageHash::from_hex(b)?;
    Ok(a.distance(&b))
}

/// Classification of a distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Distance = 0, identical low-frequency structure
    Exact,
    /// Distance 1-4, virtually identical
    NearExact,
    /// Distance 5-10, likely the same picture
    Similar,
    /// Distance 11+
    Different,
}

impl MatchType {
    /// Classify based on Hamming distance
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=4 => MatchType::NearExact,
            5..=DEFAULT_SIMILARITY_THRESHOLD => MatchType::Similar,
            _ => MatchType::Different,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
            MatchType::Different => write!(f, "Different"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 6] = [
        "0000000000000000",
        "FFFFFFFFFFFFFFFF",
        "8000000000000001",
        "DEADBEEFCAFEBABE",
        "0123456789ABCDEF",
        "F0F0F0F00F0F0F0F",
    ];

    #[test]
    fn extremes() {
        assert_eq!(distance("FFFFFFFFFFFFFFFF", "0000000000000000").unwrap(), 64);
        assert_eq!(distance("0000000000000000", "0000000000000000").unwrap(), 0);
    }

    #[test]
    fn padding_does_not_matter() {
        assert_eq!(distance("F", "000000000000000F").unwrap(), 0);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let result = distance("GGGGGGGGGGGGGGGG", "0000000000000000");
        assert!(matches!(result, Err(HashParseError::MalformedHash { .. })));

        let result = distance("0000000000000000", "10000000000000000");
        assert!(matches!(result, Err(HashParseError::MalformedHash { .. })));
    }

    #[test]
    fn metric_laws_hold() {
        for a in SAMPLES {
            assert_eq!(distance(a, a).unwrap(), 0);
            for b in SAMPLES {
                let ab = distance(a, b).unwrap();
                assert_eq!(ab, distance(b, a).unwrap());
                assert!(ab <= 64);
                for c in SAMPLES {
                    let ac = distance(a, c).unwrap();
                    let cb = distance(c, b).unwrap();
                    assert!(ab <= ac + cb, "{} {} {}", a, b, c);
                }
            }
        }
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(MatchType::from_distance(0), MatchType::Exact);
        assert_eq!(MatchType::from_distance(4), MatchType::NearExact);
        assert_eq!(MatchType::from_distance(5), MatchType::Similar);
        assert_eq!(MatchType::from_distance(10), MatchType::Similar);
        assert_eq!(MatchType::from_distance(11), MatchType::Different);
    }
}
