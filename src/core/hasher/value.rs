//! The 64-bit hash value and its text encodings.

use crate::error::HashParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 64-bit DCT perceptual hash.
///
/// Bit 63 corresponds to coefficient 0. The canonical text form is exactly
/// 16 uppercase hex digits, zero padded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct ImageHash(u64);

impl ImageHash {
    /// Number of bits in a hash
    pub const BITS: u32 = u64::BITS;

    /// Length of the canonical hex form
    pub const HEX_WIDTH: usize = 16;

    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Hamming distance: number of differing bits, 0-64
    pub fn distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Similarity as a percentage (0-100)
    pub fn similarity(&self, other: &Self) -> f64 {
        (1.0 - self.distance(other) as f64 / Self::BITS as f64) * 100.0
    }

    /// `true` when the distance is at most `threshold`
    pub fn is_similar(&self, other: &Self, threshold: u32) -> bool {
        self.distance(other) <= threshold
    }

    /// Canonical 16-character uppercase hex form
    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.0)
    }

    /// 64 characters of '0'/'1', most significant bit first
    pub fn to_binary_string(&self) -> String {
        format!("{:064b}", self.0)
    }

    /// Parse a base-16 string.
    ///
    /// Leading zeros are ignored, so `"F"` and `"000000000000000F"` decode to
    /// the same value. Signs, prefixes and whitespace are rejected.
    pub fn from_hex(input: &str) -> Result<Self, HashParseError> {
        parse_radix(input, 16, 16).map(Self)
    }

    /// Parse a string of '0'/'1' digits, most significant bit first
    pub fn from_binary_str(input: &str) -> Result<Self, HashParseError> {
        parse_radix(input, 2, 64).map(Self)
    }
}

fn parse_radix(input: &str, radix: u32, max_digits: usize) -> Result<u64, HashParseError> {
    if input.is_empty() {
        return Err(HashParseError::malformed(input, "empty string"));
    }

    if let Some(c) = input.chars().find(|c| !c.is_digit(radix)) {
        return Err(HashParseError::malformed(
            input,
            format!("invalid base-{} digit {:?}", radix, c),
        ));
    }

    let significant = input.trim_start_matches('0');
    if significant.len() > max_digits {
        return Err(HashParseError::malformed(
            input,
            format!(
                "{} significant digits exceed 64 bits",
                significant.len()
            ),
        ));
    }

    if significant.is_empty() {
        return Ok(0);
    }

    u64::from_str_radix(significant, radix)
        .map_err(|e| HashParseError::malformed(input, e.to_string()))
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

impl FromStr for ImageHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<u64> for ImageHash {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ImageHash> for u64 {
    fn from(hash: ImageHash) -> Self {
        hash.0
    }
}

impl From<ImageHash> for String {
    fn from(hash: ImageHash) -> Self {
        hash.to_hex()
    }
}

impl TryFrom<String> for ImageHash {
    type Error = HashParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_zero_padded() {
        assert_eq!(ImageHash::from_u64(0).to_hex(), "0000000000000000");
        assert_eq!(ImageHash::from_u64(0xF).to_string(), "000000000000000F");
        assert_eq!(
            ImageHash::from_u64(0xDEAD_BEEF_0000_0001).to_hex(),
            "DEADBEEF00000001"
        );
    }

    #[test]
    fn parsing_ignores_padding_and_case() {
        let short: ImageHash = "f".parse().unwrap();
        let long: ImageHash = "000000000000000F".parse().unwrap();

        assert_eq!(short, long);
        assert_eq!(short.as_u64(), 15);
    }

    #[test]
    fn extra_leading_zeros_are_accepted() {
        let hash = ImageHash::from_hex("0000FFFFFFFFFFFFFFFF").unwrap();
        assert_eq!(hash.as_u64(), u64::MAX);
    }

    #[test]
    fn seventeen_significant_digits_overflow() {
        let result = ImageHash::from_hex("1FFFFFFFFFFFFFFFF");
        assert!(matches!(result, Err(HashParseError::MalformedHash { .. })));
    }

    #[test]
    fn rejects_non_hex_input() {
        for input in ["GG", "", "+F", "0x1F", " 1F", "1F\n", "ÿ"] {
            assert!(ImageHash::from_hex(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn binary_round_trip_is_msb_first() {
        let hash = ImageHash::from_u64(1 << 63);
        let bits = hash.to_binary_string();

        assert_eq!(bits.len(), 64);
        assert!(bits.starts_with('1'));
        assert_eq!(ImageHash::from_binary_str(&bits).unwrap(), hash);
        assert_eq!(ImageHash::from_binary_str("1001").unwrap().as_u64(), 9);
        assert!(ImageHash::from_binary_str("102").is_err());
    }

    #[test]
    fn similarity_extremes() {
        let zero = ImageHash::from_u64(0);
        let ones = ImageHash::from_u64(u64::MAX);

        assert_eq!(zero.similarity(&zero), 100.0);
        assert_eq!(zero.similarity(&ones), 0.0);
        assert!(zero.is_similar(&ImageHash::from_u64(0b111), 3));
        assert!(!zero.is_similar(&ImageHash::from_u64(0b1111), 3));
    }

    #[test]
    fn serde_uses_hex_string() {
        let hash = ImageHash::from_u64(0xAB);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"00000000000000AB\"");

        let parsed: ImageHash = serde_json::from_str("\"ab\"").unwrap();
        assert_eq!(parsed, hash);
        assert!(serde_json::from_str::<ImageHash>("\"zz\"").is_err());
    }
}
