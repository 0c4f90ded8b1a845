//! Bit stuffing for transparent framing.
//!
//! After every run of [`STUFF_RUN`] consecutive ones the sender inserts a
//! `0`, so the payload can never imitate a flag pattern made of six ones.
//! The receiver tracks the same run over the bits it emits and drops the bit
//! that follows each completed run.
//!
//! # Example
//! ```
//! use framecheck_core::bit_stuffing::{bit_destuff, bit_stuff};
//! use framecheck_core::bits::BitString;
//!
//! let input: BitString = "111110".parse().unwrap();
//! let stuffed = bit_stuff(&input);
//! assert_eq!(stuffed.to_string(), "1111100");
//! assert_eq!(bit_destuff(&stuffed), input);
//! ```

use crate::bits::BitString;
use tracing::debug;

/// Length of the run of ones that triggers a stuffed bit.
pub const STUFF_RUN: usize = 5;

/// Insert a `0` after every run of five consecutive ones.
///
/// The output grows by one bit per completed run and is never shorter than
/// the input.
pub fn bit_stuff(input: &BitString) -> BitString {
    let mut output = BitString::with_capacity(input.len() + input.len() / STUFF_RUN);
    let mut run = 0;

    for bit in input.iter() {
        run = if bit { run + 1 } else { 0 };
        output.push(bit);

        if run == STUFF_RUN {
            debug!(after = output.len(), "stuffed 0 bit");
            output.push(false);
            run = 0;
        }
    }

    output
}

/// Remove the bit following every run of five consecutive ones.
///
/// The dropped bit is skipped unconditionally; it is not checked to be `0`.
/// A run that ends the input has nothing to drop.
pub fn bit_destuff(input: &BitString) -> BitString {
    let mut output = BitString::with_capacity(input.len());
    let mut run = 0;
    let mut bits = input.iter();

    while let Some(bit) = bits.next() {
        run = if bit { run + 1 } else { 0 };
        output.push(bit);

        if run == STUFF_RUN {
            if let Some(dropped) = bits.next() {
                debug!(at = output.len(), dropped, "removed stuffed bit");
            }
            run = 0;
        }
    }

    output
}
