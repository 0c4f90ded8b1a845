//! Simple even/odd parity over a bit string.

use crate::bits::BitString;
use std::fmt;

/// Parity of the number of set bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// 0 for even, 1 for odd.
    pub fn bit(self) -> u8 {
        match self {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => f.write_str("Even Parity"),
            Parity::Odd => f.write_str("Odd Parity"),
        }
    }
}

/// Count the ones in `input` and report whether the count is even or odd.
pub fn parity_check(input: &BitString) -> Parity {
    if input.count_ones() % 2 == 0 {
        Parity::Even
    } else {
        Parity::Odd
    }
}
