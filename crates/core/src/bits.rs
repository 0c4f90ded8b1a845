//! Validated bit strings.
//!
//! Every bit-level operation in this crate works on [`BitString`] rather than
//! raw text. Parsing is the single place where the `{'0','1'}` alphabet and
//! the input-size cap are enforced, so the algorithms themselves are total.
//!
//! # Example
//! ```
//! use framecheck_core::bits::BitString;
//!
//! let bits: BitString = "1011".parse().unwrap();
//! assert_eq!(bits.len(), 4);
//! assert_eq!(bits.count_ones(), 3);
//! assert_eq!(bits.to_string(), "1011");
//!
//! assert!("10a1".parse::<BitString>().is_err());
//! ```

use crate::error::{check_len, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Maximum payload length accepted from a caller, in characters.
pub const MAX_INPUT_LEN: usize = 100;

/// Maximum length of encoded input (codewords, stuffed frames).
pub const MAX_FRAMED_LEN: usize = 2 * MAX_INPUT_LEN;

/// An owned sequence of bits.
///
/// # Invariants
/// - Values built through `parse` hold at most the requested limit of bits
/// - Rendering with `Display` yields only '0' and '1'
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Create an empty bit string.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create an empty bit string with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Wrap already-decoded bits. No length cap is applied.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parse caller input, capped at [`MAX_INPUT_LEN`].
    ///
    /// # Errors
    /// - `Error::InputTooLong` if the input has more than `MAX_INPUT_LEN` characters
    /// - `Error::InvalidInput` for the first character that is not '0' or '1'
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_limit(input, MAX_INPUT_LEN)
    }

    /// Parse caller input with an explicit length cap.
    pub fn parse_with_limit(input: &str, limit: usize) -> Result<Self> {
        check_len(input.chars().count(), limit)?;

        let bits = input
            .chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(Error::InvalidInput { position, found }),
            })
            .collect::<Result<Vec<bool>>>()?;

        Ok(Self { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at 0-based `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Invert the bit at 0-based `index`, returning its new value.
    pub fn flip(&mut self, index: usize) -> Option<bool> {
        let bit = self.bits.get_mut(index)?;
        *bit = !*bit;
        Some(*bit)
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
