//! Error types for the framecheck system.
//!
//! All operations return structured errors rather than panicking.
//! Malformed input is reported to the caller instead of producing garbage
//! output or overrunning a buffer.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Input validation: characters outside the bit alphabet, oversized input
/// - Codeword access: positions outside the codeword
/// - IPv4: malformed binary address strings
/// - Configuration and I/O for the front end
#[derive(Debug, Error)]
pub enum Error {
    /// A character outside the expected alphabet was found
    #[error("invalid input: unexpected {found:?} at position {position}")]
    InvalidInput { position: usize, found: char },

    /// Input exceeds the maximum supported length
    #[error("input too long: {len} characters exceeds maximum {max}")]
    InputTooLong { len: usize, max: usize },

    /// Codeword position is outside 1..=len
    #[error("position {position} out of range for codeword of length {len}")]
    PositionOutOfRange { position: usize, len: usize },

    /// IPv4 conversion error
    #[error("ipv4 error: {0}")]
    Ipv4(#[from] Ipv4Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// IPv4 conversion errors.
#[derive(Debug, Error)]
pub enum Ipv4Error {
    /// Binary address must be exactly 32 bits
    #[error("binary address must be 32 bits, got {len}")]
    WrongLength { len: usize },

    /// Dotted-quad text could not be parsed
    #[error("invalid dotted-quad address: {0:?}")]
    InvalidDotted(String),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fail with `InputTooLong` if `len` exceeds `max`.
pub(crate) fn check_len(len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(Error::InputTooLong { len, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(check_len(100, 100).is_ok());
        assert!(matches!(
            check_len(101, 100),
            Err(Error::InputTooLong { len: 101, max: 100 })
        ));
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidInput {
            position: 3,
            found: 'x',
        };
        assert_eq!(err.to_string(), "invalid input: unexpected 'x' at position 3");

        let err: Error = Ipv4Error::WrongLength { len: 8 }.into();
        assert_eq!(err.to_string(), "ipv4 error: binary address must be 32 bits, got 8");
    }
}
