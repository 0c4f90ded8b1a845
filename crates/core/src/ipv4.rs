//! Fixed-width conversion between IPv4 addresses and 32-bit binary strings.
//!
//! Addresses are unsigned 32-bit values rendered MSB first.

use crate::error::{Error, Ipv4Error, Result};
use std::net::Ipv4Addr;

/// Width of a binary IPv4 address.
pub const ADDRESS_BITS: usize = 32;

/// Render `address` as exactly 32 binary digits, MSB first.
pub fn decimal_to_binary(address: u32) -> String {
    format!("{:032b}", address)
}

/// Parse exactly 32 binary digits into an address value.
///
/// # Errors
/// - `Ipv4Error::WrongLength` unless the input has 32 characters
/// - `Error::InvalidInput` for a character other than '0' or '1'
pub fn binary_to_decimal(binary: &str) -> Result<u32> {
    let len = binary.chars().count();
    if len != ADDRESS_BITS {
        return Err(Ipv4Error::WrongLength { len }.into());
    }

    binary
        .chars()
        .enumerate()
        .try_fold(0u32, |acc, (position, c)| match c {
            '0' => Ok(acc << 1),
            '1' => Ok((acc << 1) | 1),
            found => Err(Error::InvalidInput { position, found }),
        })
}

/// Render a dotted-quad address as 32 binary digits.
pub fn dotted_to_binary(address: Ipv4Addr) -> String {
    decimal_to_binary(u32::from(address))
}

/// Parse 32 binary digits into a dotted-quad address.
pub fn binary_to_dotted(binary: &str) -> Result<Ipv4Addr> {
    binary_to_decimal(binary).map(Ipv4Addr::from)
}

/// Accept either a plain decimal value or dotted-quad text.
pub fn parse_address(text: &str) -> Result<u32> {
    let text = text.trim();
    if let Ok(value) = text.parse::<u32>() {
        return Ok(value);
    }
    text.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| Ipv4Error::InvalidDotted(text.to_string()).into())
}
