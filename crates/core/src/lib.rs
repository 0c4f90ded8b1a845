//! framecheck-core: Link-layer integrity and framing primitives
//!
//! This library provides the core components for a learning-focused system that:
//! - Encodes bit strings into Hamming codewords and corrects parity-position errors
//! - Stuffs and destuffs bit streams after runs of five ones
//! - Stuffs and destuffs text around a doubled escape character
//! - Computes even/odd parity
//! - Converts IPv4 addresses to and from 32-bit binary strings
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bits`: Validated bit strings and input limits
//! - `hamming`: Codeword generation, error injection, correction
//! - `bit_stuffing`: Bit stuffing and destuffing
//! - `char_stuffing`: Character stuffing and destuffing
//! - `parity`: Parity checking
//! - `ipv4`: Binary/decimal address conversion
//! - `channel`: Noisy channel with seeded randomness
//! - `metrics`: Observable run behavior
//!
//! # Design Principles
//!
//! - **No panics**: Malformed input is a structured error
//! - **Bounded input**: Caller input is capped, outputs are owned values
//! - **Deterministic**: Randomness is injected and seeded, never global

pub mod bit_stuffing;
pub mod bits;
pub mod channel;
pub mod char_stuffing;
pub mod error;
pub mod hamming;
pub mod ipv4;
pub mod metrics;
pub mod parity;

// Re-export commonly used types
pub use bits::{BitString, MAX_FRAMED_LEN, MAX_INPUT_LEN};
pub use error::{Error, Result};
pub use hamming::{Codeword, Position, Syndrome};
