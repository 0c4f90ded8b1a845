//! Hamming code generation, error injection and parity-position correction.
//!
//! A codeword of length `n = data_len + r` keeps parity bits at the
//! power-of-two positions (1, 2, 4, 8, ...) and data bits everywhere else,
//! in increasing position order.
//!
//! # Positions
//!
//! Codeword positions are 1-based throughout the public API and carried in
//! the [`Position`] newtype. Storage is 0-based; the conversion happens only
//! in [`Position::index`].
//!
//! # Parity Coverage
//!
//! Parity bit `p = 2^i` covers the windows `p..=2p-1`, `3p..=4p-1`,
//! `5p..=6p-1`, ... clipped to `n`. The parity bit is the plain XOR of its
//! window contents, so a correctly generated codeword has an all-zero
//! syndrome.
//!
//! # Correction Limits
//!
//! [`correct_errors`] flips the parity bit of every failing check. It does
//! NOT flip the bit named by the syndrome value. A single error at a parity
//! position is therefore repaired, while a single error at a data position
//! is left in place and the parity bits of the failing checks are flipped as
//! well. [`Syndrome::error_position`] reports the textbook error index for
//! diagnostics only.

use crate::bits::{BitString, MAX_FRAMED_LEN};
use crate::error::{Error, Result};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// A 1-based position inside a codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(usize);

impl Position {
    /// Create a position. Returns `None` for 0.
    pub fn new(position: usize) -> Option<Self> {
        (position > 0).then_some(Self(position))
    }

    /// The 1-based value.
    pub fn get(self) -> usize {
        self.0
    }

    /// The 0-based storage index.
    pub fn index(self) -> usize {
        self.0 - 1
    }

    /// True for power-of-two positions, which hold parity bits.
    pub fn is_parity(self) -> bool {
        self.0.is_power_of_two()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Hamming codeword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: BitString,
}

impl Codeword {
    /// Parse a received codeword.
    ///
    /// Codewords are longer than the payload they protect, so the cap is
    /// [`MAX_FRAMED_LEN`].
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            bits: BitString::parse_with_limit(input, MAX_FRAMED_LEN)?,
        })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `position`, or `None` past the end.
    pub fn bit(&self, position: Position) -> Option<bool> {
        self.bits.get(position.index())
    }

    /// Invert the bit at `position`.
    ///
    /// # Errors
    /// `Error::PositionOutOfRange` if `position > len()`.
    pub fn flip(&mut self, position: Position) -> Result<()> {
        if position.get() > self.len() {
            return Err(Error::PositionOutOfRange {
                position: position.get(),
                len: self.len(),
            });
        }

        self.bits.flip(position.index());
        Ok(())
    }

    /// Parity positions present in this codeword, ascending.
    pub fn parity_positions(&self) -> impl Iterator<Item = Position> {
        (0..parity_count(self.len())).map(|i| Position(1 << i))
    }

    /// Recompute every parity check without modifying the codeword.
    pub fn syndrome(&self) -> Syndrome {
        let bits = self.bits.as_slice();
        let checks = (0..parity_count(bits.len()))
            .map(|i| window_parity(bits, 1 << i))
            .collect();
        Syndrome { checks }
    }

    /// Data bits, read from the non-parity positions in order.
    pub fn data_bits(&self) -> BitString {
        self.bits
            .iter()
            .enumerate()
            .filter(|(index, _)| !(index + 1).is_power_of_two())
            .map(|(_, bit)| bit)
            .collect()
    }

    pub fn as_bit_string(&self) -> &BitString {
        &self.bits
    }

    pub fn into_bit_string(self) -> BitString {
        self.bits
    }
}

impl From<BitString> for Codeword {
    fn from(bits: BitString) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bits.fmt(f)
    }
}

/// Results of the parity checks over a codeword.
///
/// `checks[i]` is true when the check for parity position `2^i` failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Syndrome {
    checks: Vec<bool>,
}

impl Syndrome {
    /// True when every check passed.
    pub fn is_zero(&self) -> bool {
        self.checks.iter().all(|&failed| !failed)
    }

    /// Per-check results, lowest parity position first.
    pub fn checks(&self) -> &[bool] {
        &self.checks
    }

    /// Parity positions whose check failed.
    pub fn failing_positions(&self) -> Vec<Position> {
        self.checks
            .iter()
            .enumerate()
            .filter(|(_, &failed)| failed)
            .map(|(i, _)| Position(1 << i))
            .collect()
    }

    /// The syndrome read as a binary position index.
    ///
    /// For a single error this names the flipped position. [`correct_errors`]
    /// does not act on it.
    pub fn error_position(&self) -> Option<Position> {
        let value = self
            .failing_positions()
            .iter()
            .fold(0, |acc, position| acc | position.get());
        Position::new(value)
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Most significant check first, as a binary number.
        for &failed in self.checks.iter().rev() {
            f.write_str(if failed { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Smallest `r` with `2^r >= data_len + r + 1`.
///
/// Defined for every `data_len`; lengths too large for the bound to fit in
/// a `usize` saturate at `usize::BITS`.
pub fn redundant_bits(data_len: usize) -> usize {
    let mut r: u32 = 0;
    while let Some(power) = 1usize.checked_shl(r) {
        if power >= data_len.saturating_add(r as usize + 1) {
            break;
        }
        r += 1;
    }
    r as usize
}

/// Number of power-of-two positions in a codeword of `codeword_len` bits.
///
/// For every generated codeword this equals `redundant_bits` of its data
/// length.
pub fn parity_count(codeword_len: usize) -> usize {
    (usize::BITS - codeword_len.leading_zeros()) as usize
}

/// Encode `data` into a Hamming codeword.
pub fn generate_hamming_code(data: &BitString) -> Codeword {
    let r = redundant_bits(data.len());
    let n = data.len() + r;

    let mut bits = vec![false; n];
    let data_slots = (1..=n).filter(|pos| !pos.is_power_of_two());
    for (pos, bit) in data_slots.zip(data.iter()) {
        bits[pos - 1] = bit;
    }

    for i in 0..r {
        let parity_position = 1 << i;
        bits[parity_position - 1] = window_parity(&bits, parity_position);
    }

    debug!(data_len = data.len(), redundant = r, "generated hamming codeword");

    Codeword {
        bits: BitString::from_bits(bits),
    }
}

/// Flip the bit at `position`.
pub fn simulate_error_at(codeword: &mut Codeword, position: Position) -> Result<()> {
    codeword.flip(position)?;
    debug!(%position, "injected bit error");
    Ok(())
}

/// Flip one uniformly chosen bit, drawing the position from `rng`.
///
/// Returns the flipped position, or `None` for an empty codeword.
pub fn simulate_error<R: Rng>(codeword: &mut Codeword, rng: &mut R) -> Option<Position> {
    if codeword.is_empty() {
        return None;
    }

    let position = Position(rng.gen_range(1..=codeword.len()));
    // In range by construction
    simulate_error_at(codeword, position).ok()?;
    Some(position)
}

/// Run every parity check and flip the parity bit of each failing one.
///
/// Returns the syndrome that was acted on. See the module docs for why this
/// only repairs errors at parity positions.
pub fn correct_errors(codeword: &mut Codeword) -> Syndrome {
    let r = parity_count(codeword.len());
    let mut checks = Vec::with_capacity(r);

    for i in 0..r {
        let parity_position = 1 << i;
        let failed = window_parity(codeword.bits.as_slice(), parity_position);
        if failed {
            debug!(parity_position, "parity check failed, flipping parity bit");
            codeword.bits.flip(parity_position - 1);
        }
        checks.push(failed);
    }

    Syndrome { checks }
}

/// XOR of every bit covered by parity position `p` (1-based, a power of two).
fn window_parity(bits: &[bool], p: usize) -> bool {
    let n = bits.len();
    let mut parity = false;

    for start in (p..=n).step_by(2 * p) {
        let end = (start + p - 1).min(n);
        for pos in start..=end {
            parity ^= bits[pos - 1];
        }
    }

    parity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::MAX_INPUT_LEN;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bits(s: &str) -> BitString {
        BitString::parse(s).unwrap()
    }

    fn pos(n: usize) -> Position {
        Position::new(n).unwrap()
    }

    #[test]
    fn test_redundant_bits() {
        let cases = [
            (0, 0),
            (1, 2),
            (2, 3),
            (3, 3),
            (4, 3),
            (5, 4),
            (7, 4),
            (11, 4),
            (12, 5),
            (26, 5),
            (27, 6),
            (100, 7),
        ];
        for (data_len, expected) in cases {
            assert_eq!(redundant_bits(data_len), expected, "data_len={}", data_len);
        }
    }

    #[test]
    fn test_redundant_bits_is_minimal() {
        for data_len in 0..=200 {
            let r = redundant_bits(data_len);
            assert!((1usize << r) >= data_len + r + 1);
            if r > 0 {
                assert!((1usize << (r - 1)) < data_len + r);
            }
        }
    }

    #[test]
    fn test_bit_counts_at_usize_extremes() {
        let bits = usize::BITS as usize;

        assert_eq!(parity_count(0), 0);
        assert_eq!(parity_count(1), 1);
        assert_eq!(parity_count(usize::MAX), bits);
        assert_eq!(parity_count(1 << (bits - 1)), bits);

        assert_eq!(redundant_bits(usize::MAX), bits);
        assert_eq!(redundant_bits(usize::MAX - bits), bits);
        assert_eq!(redundant_bits((1 << (bits - 1)) - bits), bits - 1);
    }

    #[test]
    fn test_parity_count_matches_generation() {
        for data_len in 0..=200 {
            let r = redundant_bits(data_len);
            assert_eq!(parity_count(data_len + r), r, "data_len={}", data_len);
        }
    }

    #[test]
    fn test_generate_1011() {
        let codeword = generate_hamming_code(&bits("1011"));
        assert_eq!(codeword.to_string(), "0110011");
        assert!(codeword.syndrome().is_zero());
    }

    #[test]
    fn test_generate_layout() {
        let codeword = generate_hamming_code(&bits("1001101"));
        assert_eq!(codeword.len(), 11);

        let parity: Vec<usize> = codeword.parity_positions().map(Position::get).collect();
        assert_eq!(parity, vec![1, 2, 4, 8]);

        assert_eq!(codeword.data_bits(), bits("1001101"));
    }

    #[test]
    fn test_generate_empty() {
        let codeword = generate_hamming_code(&BitString::new());
        assert!(codeword.is_empty());
        assert!(codeword.syndrome().is_zero());
    }

    #[test]
    fn test_generated_codewords_have_zero_syndrome() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for len in 0..=MAX_INPUT_LEN {
            let data: BitString = (0..len).map(|_| rng.gen()).collect();
            let codeword = generate_hamming_code(&data);
            assert!(codeword.syndrome().is_zero(), "len={}", len);
            assert_eq!(codeword.data_bits(), data);
        }
    }

    #[test]
    fn test_parity_position_error_is_corrected() {
        let original = generate_hamming_code(&bits("1011"));

        let mut received = original.clone();
        simulate_error_at(&mut received, pos(4)).unwrap();
        assert_eq!(received.to_string(), "0111011");

        let syndrome = correct_errors(&mut received);
        assert_eq!(syndrome.failing_positions(), vec![pos(4)]);
        assert_eq!(received, original);
    }

    #[test]
    fn test_data_position_error_is_not_corrected() {
        let original = generate_hamming_code(&bits("1011"));

        let mut received = original.clone();
        simulate_error_at(&mut received, pos(3)).unwrap();

        let syndrome = correct_errors(&mut received);
        assert_eq!(syndrome.failing_positions(), vec![pos(1), pos(2)]);
        assert_eq!(syndrome.error_position(), Some(pos(3)));

        // Parity bits 1 and 2 were flipped; the data error remains.
        assert_eq!(received.to_string(), "1000011");
        assert_ne!(received, original);
        assert!(received.syndrome().is_zero());
    }

    #[test]
    fn test_single_flip_restored_only_at_parity_positions() {
        let original = generate_hamming_code(&bits("110100111010"));

        for p in 1..=original.len() {
            let mut received = original.clone();
            simulate_error_at(&mut received, pos(p)).unwrap();
            assert_eq!(received.syndrome().error_position(), Some(pos(p)));

            correct_errors(&mut received);
            assert_eq!(received == original, pos(p).is_parity(), "position {}", p);
        }
    }

    #[test]
    fn test_correct_clean_codeword_is_noop() {
        let original = generate_hamming_code(&bits("0101110"));
        let mut received = original.clone();

        let syndrome = correct_errors(&mut received);
        assert!(syndrome.is_zero());
        assert_eq!(syndrome.error_position(), None);
        assert_eq!(received, original);
    }

    #[test]
    fn test_flip_out_of_range() {
        let mut codeword = generate_hamming_code(&bits("1011"));
        let result = simulate_error_at(&mut codeword, pos(8));
        assert!(matches!(
            result,
            Err(Error::PositionOutOfRange { position: 8, len: 7 })
        ));
    }

    #[test]
    fn test_position_zero_rejected() {
        assert!(Position::new(0).is_none());
        assert_eq!(pos(5).index(), 4);
        assert!(pos(8).is_parity());
        assert!(!pos(6).is_parity());
    }

    #[test]
    fn test_simulate_error_flips_exactly_one_bit() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let original = generate_hamming_code(&bits("10110011101"));

        for _ in 0..50 {
            let mut received = original.clone();
            let position = simulate_error(&mut received, &mut rng).unwrap();
            assert!(position.get() >= 1 && position.get() <= original.len());

            let differing = original
                .as_bit_string()
                .iter()
                .zip(received.as_bit_string().iter())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(differing, 1);
            assert_ne!(original.bit(position), received.bit(position));
        }
    }

    #[test]
    fn test_simulate_error_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut codeword = Codeword::default();
        assert_eq!(simulate_error(&mut codeword, &mut rng), None);
    }

    #[test]
    fn test_syndrome_display() {
        let mut codeword = generate_hamming_code(&bits("1011"));
        codeword.flip(pos(6)).unwrap();
        assert_eq!(codeword.syndrome().to_string(), "110");
    }

    #[test]
    fn test_parse_codeword() {
        let codeword = Codeword::parse("0110011").unwrap();
        assert!(codeword.syndrome().is_zero());
        assert_eq!(codeword.data_bits().to_string(), "1011");

        assert!(Codeword::parse(&"0".repeat(MAX_FRAMED_LEN)).is_ok());
        assert!(matches!(
            Codeword::parse(&"0".repeat(MAX_FRAMED_LEN + 1)),
            Err(Error::InputTooLong { .. })
        ));
    }
}
