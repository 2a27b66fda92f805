use std::fmt;
use std::ops::{BitXor, Not};
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::consts::{HASH_BITS, HASH_SIZE};
use crate::error::Error;

/// Bit that cell `(row, col)` of the 8x8 bit grid maps to.
///
/// Row-major scan from the top left corner, most significant bit first:
/// `(0, 0)` is bit 63 and `(7, 7)` is bit 0.
#[inline]
pub const fn bit_index(row: usize, col: usize) -> u32 {
    ((HASH_SIZE * HASH_SIZE - 1) - (row * HASH_SIZE + col)) as u32
}

/// 64-bit perceptual fingerprint of an image.
///
/// Renders as `0b` followed by 64 binary digits, most significant bit first,
/// and serializes in the same form.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const BITS: u32 = HASH_BITS;

    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Sets the bit of every cell for which `predicate(row, col)` holds.
    pub fn from_predicate(mut predicate: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bits = 0u64;
        for row in 0..HASH_SIZE {
            for col in 0..HASH_SIZE {
                if predicate(row, col) {
                    bits |= 1 << bit_index(row, col);
                }
            }
        }
        Self(bits)
    }

    /// Whether the bit for cell `(row, col)` is set.
    pub fn cell(self, row: usize, col: usize) -> bool {
        self.0 & (1 << bit_index(row, col)) != 0
    }

    pub fn count_ones(self) -> u32 {
        self.0.count_ones()
    }
}

impl From<u64> for Fingerprint {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Fingerprint> for u64 {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl Not for Fingerprint {
    type Output = Fingerprint;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitXor for Fingerprint {
    type Output = Fingerprint;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{:064b}", self.0)
    }
}

impl fmt::LowerHex for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    /// Accepts the `Display` form, with or without the `0b` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0b").unwrap_or(s);
        if digits.len() != HASH_BITS as usize {
            return Err(Error::ParseFingerprint(format!(
                "expected {} binary digits, got {}",
                HASH_BITS,
                digits.len()
            )));
        }

        let mut result = 0u64;
        for (i, ch) in digits.chars().enumerate() {
            match ch {
                '1' => result |= 1 << (HASH_BITS as usize - 1 - i),
                '0' => {}
                _ => {
                    return Err(Error::ParseFingerprint(format!(
                        "invalid character in binary string: {}",
                        ch
                    )))
                }
            }
        }

        Ok(Self(result))
    }
}
