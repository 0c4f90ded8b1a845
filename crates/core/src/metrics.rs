//! Metrics collection and reporting for a framecheck run.
//!
//! This module makes the behavior of the Hamming corrector observable:
//! - Operations performed and inputs rejected
//! - Hamming trials, split by whether correction restored the codeword
//! - Where the injected error landed (parity or data position)
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. Collect per-thread and merge if
//! ever needed.

use crate::hamming::Position;
use std::time::{Duration, Instant};

/// Counters for one run of the tool.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Operations ===
    /// Operations that completed successfully
    pub operations: u64,

    /// Inputs rejected as invalid or too long
    pub inputs_rejected: u64,

    // === Hamming ===
    /// Codewords generated, corrupted and corrected
    pub hamming_trials: u64,

    /// Total payload bits across all trials
    pub payload_bits: u64,

    /// Total codeword bits across all trials
    pub codeword_bits: u64,

    /// Trials where the injected error hit a parity position
    pub parity_position_errors: u64,

    /// Trials where correction restored the original codeword
    pub codewords_restored: u64,

    /// Trials where the codeword differed from the original after correction
    pub codewords_not_restored: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            operations: 0,
            inputs_rejected: 0,
            hamming_trials: 0,
            payload_bits: 0,
            codeword_bits: 0,
            parity_position_errors: 0,
            codewords_restored: 0,
            codewords_not_restored: 0,
        }
    }

    /// Record one Hamming trial.
    pub fn record_trial(
        &mut self,
        payload_len: usize,
        codeword_len: usize,
        error_at: Option<Position>,
        restored: bool,
    ) {
        self.hamming_trials += 1;
        self.payload_bits += payload_len as u64;
        self.codeword_bits += codeword_len as u64;

        if error_at.is_some_and(Position::is_parity) {
            self.parity_position_errors += 1;
        }

        if restored {
            self.codewords_restored += 1;
        } else {
            self.codewords_not_restored += 1;
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Fraction of trials whose codeword was restored.
    pub fn restore_rate(&self) -> f64 {
        if self.hamming_trials == 0 {
            0.0
        } else {
            self.codewords_restored as f64 / self.hamming_trials as f64
        }
    }

    /// Code rate (payload bits / codeword bits).
    pub fn code_rate(&self) -> f64 {
        if self.codeword_bits == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.codeword_bits as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Operations: {}", self.operations);
        println!("Inputs rejected: {}", self.inputs_rejected);
        println!();

        println!("=== Hamming ===");
        println!("Trials: {}", self.hamming_trials);
        println!("Payload bits: {}", self.payload_bits);
        println!("Codeword bits: {}", self.codeword_bits);
        println!("Code rate: {:.1}%", self.code_rate() * 100.0);
        println!("Errors at parity positions: {}", self.parity_position_errors);
        println!(
            "Restored: {} ({:.2}%)",
            self.codewords_restored,
            self.restore_rate() * 100.0
        );
        println!("Not restored: {}", self.codewords_not_restored);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             operations={}\n\
             inputs_rejected={}\n\
             hamming_trials={}\n\
             code_rate={:.4}\n\
             parity_position_errors={}\n\
             codewords_restored={}\n\
             codewords_not_restored={}\n\
             restore_rate={:.4}\n",
            self.duration().as_millis(),
            self.operations,
            self.inputs_rejected,
            self.hamming_trials,
            self.code_rate(),
            self.parity_position_errors,
            self.codewords_restored,
            self.codewords_not_restored,
            self.restore_rate(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
