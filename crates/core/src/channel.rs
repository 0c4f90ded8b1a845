//! Noisy channel that corrupts codewords with seeded randomness.
//!
//! This module simulates bit errors on a link in a deterministic way. All
//! corruption is reproducible given the same seed and the same sequence of
//! codewords.
//!
//! # Simulated Effects
//!
//! - **Single error**: exactly one uniformly chosen bit flipped per codeword
//!   ([`ErrorChannel::inject`])
//! - **Bit error rate**: every bit flipped independently with probability
//!   `bit_error_rate` ([`ErrorChannel::transmit`])
//!
//! # Determinism
//!
//! All randomness comes from a seeded ChaCha8 RNG. Given the same seed
//! and inputs, outputs are bit-identical.

use crate::hamming::{simulate_error, simulate_error_at, Codeword, Position};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Configuration for channel simulation.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Per-bit flip probability used by `transmit` [0.0, 1.0]
    pub bit_error_rate: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel that never corrupts on `transmit`.
    pub fn noiseless(seed: u64) -> Self {
        Self {
            bit_error_rate: 0.0,
            seed,
        }
    }

    /// A channel meant for `inject`, one error per codeword.
    pub fn single_error(seed: u64) -> Self {
        Self::noiseless(seed)
    }
}

/// Channel that flips codeword bits.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread.
pub struct ErrorChannel {
    config: ChannelConfig,
    rng: ChaCha8Rng,

    // Statistics
    codewords_sent: u64,
    bits_sent: u64,
    bits_flipped: u64,
}

impl ErrorChannel {
    /// Create a new channel with the given configuration.
    pub fn new(config: ChannelConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Self {
            config,
            rng,
            codewords_sent: 0,
            bits_sent: 0,
            bits_flipped: 0,
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Flip exactly one uniformly chosen bit of `codeword`.
    ///
    /// Returns the flipped position, or `None` for an empty codeword.
    pub fn inject(&mut self, codeword: &mut Codeword) -> Option<Position> {
        self.record(codeword);

        let position = simulate_error(codeword, &mut self.rng)?;
        self.bits_flipped += 1;
        Some(position)
    }

    /// Flip each bit of `codeword` independently with the configured rate.
    ///
    /// Returns the flipped positions in ascending order.
    pub fn transmit(&mut self, codeword: &mut Codeword) -> Vec<Position> {
        self.record(codeword);

        if self.config.bit_error_rate <= 0.0 {
            return Vec::new();
        }

        let mut flipped = Vec::new();
        for position in (1..=codeword.len()).filter_map(Position::new) {
            let roll: f64 = self.rng.gen();
            if roll < self.config.bit_error_rate && simulate_error_at(codeword, position).is_ok() {
                flipped.push(position);
            }
        }

        self.bits_flipped += flipped.len() as u64;
        debug!(flipped = flipped.len(), len = codeword.len(), "transmitted codeword");
        flipped
    }

    /// Get statistics about channel behavior.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            codewords_sent: self.codewords_sent,
            bits_sent: self.bits_sent,
            bits_flipped: self.bits_flipped,
        }
    }

    fn record(&mut self, codeword: &Codeword) {
        self.codewords_sent += 1;
        self.bits_sent += codeword.len() as u64;
    }
}

/// Statistics about channel behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Codewords passed through the channel
    pub codewords_sent: u64,

    /// Total bits passed through the channel
    pub bits_sent: u64,

    /// Bits flipped by the channel
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Observed bit error rate (flipped / sent).
    pub fn bit_error_rate(&self) -> f64 {
        if self.bits_sent == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_sent as f64
        }
    }
}
