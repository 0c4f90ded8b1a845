//! Applies operations to user input and writes the results.
//!
//! Both the interactive menu and the one-shot commands go through
//! [`Session::execute`], so output format, logging and metrics are the same
//! in either mode.

use std::io::Write;

use framecheck_core::{
    bit_stuffing::{bit_destuff, bit_stuff},
    channel::{ChannelConfig, ErrorChannel},
    char_stuffing::CharStuffer,
    hamming::{correct_errors, generate_hamming_code, simulate_error, simulate_error_at},
    ipv4,
    metrics::Metrics,
    parity::parity_check,
    BitString, Error, Position, Result, MAX_FRAMED_LEN,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::input_gen::generate_payload;

/// A single-input operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    BitStuff,
    BitDestuff,
    CharStuff,
    CharDestuff,
    Hamming,
    Parity,
    IpToBin,
    BinToIp,
}

impl Operation {
    /// Look up an operation by its command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        let operation = match name {
            "bit-stuff" => Operation::BitStuff,
            "bit-destuff" => Operation::BitDestuff,
            "char-stuff" => Operation::CharStuff,
            "char-destuff" => Operation::CharDestuff,
            "hamming" => Operation::Hamming,
            "parity" => Operation::Parity,
            "ip-to-bin" => Operation::IpToBin,
            "bin-to-ip" => Operation::BinToIp,
            _ => return None,
        };
        Some(operation)
    }
}

/// State shared across the operations of one run.
pub struct Session {
    rng: ChaCha8Rng,
    stuffer: CharStuffer,
    metrics: Metrics,
}

impl Session {
    pub fn new(seed: u64, escape: char) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            stuffer: CharStuffer::new(escape),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn into_metrics(mut self) -> Metrics {
        self.metrics.complete();
        self.metrics
    }

    /// Apply `operation` to `input`, writing results to `out`.
    ///
    /// `error_at` only applies to `Operation::Hamming`; without it the error
    /// position is drawn from the session RNG.
    ///
    /// Rejected input is counted and returned; nothing is written for it.
    pub fn execute<W: Write>(
        &mut self,
        operation: Operation,
        input: &str,
        error_at: Option<usize>,
        out: &mut W,
    ) -> Result<()> {
        let result = self.apply(operation, input, error_at, out);

        match &result {
            Ok(()) => self.metrics.operations += 1,
            Err(Error::Io(_)) => {}
            Err(e) => {
                warn!(?operation, error = %e, "input rejected");
                self.metrics.inputs_rejected += 1;
            }
        }

        result
    }

    fn apply<W: Write>(
        &mut self,
        operation: Operation,
        input: &str,
        error_at: Option<usize>,
        out: &mut W,
    ) -> Result<()> {
        match operation {
            Operation::BitStuff => {
                let stuffed = bit_stuff(&BitString::parse(input)?);
                writeln!(out, "Bit-stuffed data: {}", stuffed)?;
            }
            Operation::BitDestuff => {
                let input = BitString::parse_with_limit(input, MAX_FRAMED_LEN)?;
                writeln!(out, "Bit-destuffed data: {}", bit_destuff(&input))?;
            }
            Operation::CharStuff => {
                writeln!(out, "Character-stuffed data: {}", self.stuffer.stuff(input)?)?;
            }
            Operation::CharDestuff => {
                writeln!(out, "Character-destuffed data: {}", self.stuffer.destuff(input)?)?;
            }
            Operation::Hamming => self.hamming(input, error_at, out)?,
            Operation::Parity => {
                let parity = parity_check(&BitString::parse(input)?);
                writeln!(out, "Parity check result: {}", parity)?;
            }
            Operation::IpToBin => {
                let address = ipv4::parse_address(input)?;
                writeln!(out, "Binary representation: {}", ipv4::decimal_to_binary(address))?;
            }
            Operation::BinToIp => {
                let address = ipv4::binary_to_decimal(input)?;
                writeln!(
                    out,
                    "Decimal representation: {} ({})",
                    address,
                    std::net::Ipv4Addr::from(address)
                )?;
            }
        }
        Ok(())
    }

    /// Encode, corrupt one bit, correct, and report each stage.
    fn hamming<W: Write>(&mut self, input: &str, error_at: Option<usize>, out: &mut W) -> Result<()> {
        let data = BitString::parse(input)?;
        let codeword = generate_hamming_code(&data);

        let mut received = codeword.clone();
        let flipped = match error_at {
            Some(position) => {
                let position = Position::new(position).ok_or(Error::PositionOutOfRange {
                    position,
                    len: codeword.len(),
                })?;
                simulate_error_at(&mut received, position)?;
                Some(position)
            }
            None => simulate_error(&mut received, &mut self.rng),
        };

        writeln!(out, "Hamming Code: {}", codeword)?;
        match flipped {
            Some(position) => writeln!(
                out,
                "Simulated error in Hamming Code: {} (bit {} flipped)",
                received, position
            )?,
            None => writeln!(out, "Simulated error in Hamming Code: (no bits to flip)")?,
        }

        let syndrome = correct_errors(&mut received);
        writeln!(out, "Syndrome: {}", syndrome)?;
        writeln!(out, "Corrected Hamming Code: {}", received)?;

        let restored = received == codeword;
        match flipped {
            Some(position) if !restored => writeln!(
                out,
                "Not restored: bit {} is a data position; only parity positions are corrected",
                position
            )?,
            _ => writeln!(out, "Restored: codeword matches the original")?,
        }

        self.metrics
            .record_trial(data.len(), codeword.len(), flipped, restored);
        Ok(())
    }

    /// Run `trials` random Hamming trials of `payload_len` bits through a
    /// single-error channel seeded from the session RNG.
    pub fn simulate(&mut self, trials: u64, payload_len: usize) {
        let channel_seed: u64 = self.rng.gen();
        let mut channel = ErrorChannel::new(ChannelConfig::single_error(channel_seed));
        info!(trials, payload_len, "starting simulation");

        for _ in 0..trials {
            let data = generate_payload(&mut self.rng, payload_len);
            let codeword = generate_hamming_code(&data);

            let mut received = codeword.clone();
            let flipped = channel.inject(&mut received);
            correct_errors(&mut received);

            self.metrics
                .record_trial(data.len(), codeword.len(), flipped, received == codeword);
        }

        let stats = channel.stats();
        info!(
            codewords = stats.codewords_sent,
            bits_flipped = stats.bits_flipped,
            "simulation complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, operation: Operation, input: &str) -> Result<String> {
        let mut out = Vec::new();
        session.execute(operation, input, None, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::from_name("bit-stuff"), Some(Operation::BitStuff));
        assert_eq!(Operation::from_name("bin-to-ip"), Some(Operation::BinToIp));
        assert_eq!(Operation::from_name("nope"), None);
    }

    #[test]
    fn test_stuffing_output() {
        let mut session = Session::new(1, 'D');
        assert_eq!(
            run(&mut session, Operation::BitStuff, "111110").unwrap(),
            "Bit-stuffed data: 1111100\n"
        );
        assert_eq!(
            run(&mut session, Operation::BitDestuff, "1111100").unwrap(),
            "Bit-destuffed data: 111110\n"
        );
        assert_eq!(
            run(&mut session, Operation::CharStuff, "DATA").unwrap(),
            "Character-stuffed data: DDATA\n"
        );
        assert_eq!(
            run(&mut session, Operation::CharDestuff, "DDATA").unwrap(),
            "Character-destuffed data: DATA\n"
        );
        assert_eq!(session.metrics().operations, 4);
    }

    #[test]
    fn test_parity_and_ipv4_output() {
        let mut session = Session::new(1, 'D');
        assert_eq!(
            run(&mut session, Operation::Parity, "1011").unwrap(),
            "Parity check result: Odd Parity\n"
        );
        assert_eq!(
            run(&mut session, Operation::IpToBin, "192.168.1.1").unwrap(),
            "Binary representation: 11000000101010000000000100000001\n"
        );
        assert_eq!(
            run(&mut session, Operation::BinToIp, "11000000101010000000000100000001").unwrap(),
            "Decimal representation: 3232235777 (192.168.1.1)\n"
        );
    }

    #[test]
    fn test_hamming_parity_position() {
        let mut session = Session::new(1, 'D');
        let mut out = Vec::new();
        session
            .execute(Operation::Hamming, "1011", Some(4), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Hamming Code: 0110011\n"));
        assert!(text.contains("Simulated error in Hamming Code: 0111011 (bit 4 flipped)\n"));
        assert!(text.contains("Syndrome: 100\n"));
        assert!(text.contains("Corrected Hamming Code: 0110011\n"));
        assert!(text.contains("Restored"));
        assert_eq!(session.metrics().codewords_restored, 1);
    }

    #[test]
    fn test_hamming_data_position() {
        let mut session = Session::new(1, 'D');
        let mut out = Vec::new();
        session
            .execute(Operation::Hamming, "1011", Some(3), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Corrected Hamming Code: 1000011\n"));
        assert!(text.contains("Not restored: bit 3 is a data position"));
        assert_eq!(session.metrics().codewords_not_restored, 1);
    }

    #[test]
    fn test_hamming_error_out_of_range() {
        let mut session = Session::new(1, 'D');
        let mut out = Vec::new();
        let result = session.execute(Operation::Hamming, "1011", Some(9), &mut out);

        assert!(matches!(
            result,
            Err(Error::PositionOutOfRange { position: 9, len: 7 })
        ));
        assert!(out.is_empty());
        assert_eq!(session.metrics().inputs_rejected, 1);
    }

    #[test]
    fn test_rejected_input_counted() {
        let mut session = Session::new(1, 'D');
        assert!(run(&mut session, Operation::BitStuff, "10201").is_err());
        assert!(run(&mut session, Operation::BinToIp, "1").is_err());
        assert_eq!(session.metrics().inputs_rejected, 2);
        assert_eq!(session.metrics().operations, 0);
    }

    #[test]
    fn test_destuff_accepts_stuffed_length() {
        let mut session = Session::new(1, 'D');
        let input = "1".repeat(framecheck_core::MAX_INPUT_LEN);
        let stuffed = run(&mut session, Operation::BitStuff, &input).unwrap();
        let stuffed = stuffed.trim_start_matches("Bit-stuffed data: ").trim_end();

        let destuffed = run(&mut session, Operation::BitDestuff, stuffed).unwrap();
        assert_eq!(destuffed, format!("Bit-destuffed data: {}\n", input));
    }

    #[test]
    fn test_simulate() {
        let mut session = Session::new(42, 'D');
        session.simulate(200, 16);

        let metrics = session.into_metrics();
        assert_eq!(metrics.hamming_trials, 200);
        assert_eq!(metrics.codewords_restored, metrics.parity_position_errors);
        assert_eq!(
            metrics.codewords_restored + metrics.codewords_not_restored,
            200
        );
    }
}
