//! Payload generation for simulation runs.
//!
//! Generated payloads mix shapes that exercise different code paths:
//! - Uniform random bits
//! - Long runs of ones (many stuffed bits)
//! - Alternating bits (no stuffing at all)
//! - A short repeating pattern

use framecheck_core::BitString;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Generate one payload of exactly `len` bits.
pub fn generate_payload(rng: &mut ChaCha8Rng, len: usize) -> BitString {
    let shape: u8 = rng.gen_range(0..10);

    match shape {
        // 40% uniform random
        0..=3 => (0..len).map(|_| rng.gen()).collect(),

        // 30% mostly ones
        4..=6 => (0..len).map(|_| rng.gen_bool(0.9)).collect(),

        // 10% alternating, random phase
        7 => {
            let phase: bool = rng.gen();
            (0..len).map(|i| (i % 2 == 0) ^ phase).collect()
        }

        // 20% repeating pattern
        _ => {
            let pattern = generate_pattern(rng);
            (0..len).map(|i| pattern[i % pattern.len()]).collect()
        }
    }
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<bool> {
    let pattern_len = rng.gen_range(2..=8);
    (0..pattern_len).map(|_| rng.gen()).collect()
}
