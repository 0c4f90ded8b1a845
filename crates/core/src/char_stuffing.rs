//! Character stuffing with a doubled escape character.
//!
//! The escape character doubles as frame marker and payload character. The
//! sender emits every payload occurrence twice; the receiver collapses each
//! doubled pair back into one.

use crate::bits::{MAX_FRAMED_LEN, MAX_INPUT_LEN};
use crate::error::{check_len, Result};
use tracing::debug;

/// Escape character used when none is configured.
pub const DEFAULT_ESCAPE: char = 'D';

/// Stuffs and destuffs text around a single escape character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharStuffer {
    escape: char,
}

impl CharStuffer {
    pub fn new(escape: char) -> Self {
        Self { escape }
    }

    pub fn escape(&self) -> char {
        self.escape
    }

    /// Emit every escape character twice, everything else verbatim.
    ///
    /// # Errors
    /// `Error::InputTooLong` if the input has more than `MAX_INPUT_LEN` characters.
    pub fn stuff(&self, input: &str) -> Result<String> {
        check_len(input.chars().count(), MAX_INPUT_LEN)?;

        let mut output = String::with_capacity(input.len() * 2);
        for c in input.chars() {
            output.push(c);
            if c == self.escape {
                output.push(c);
            }
        }

        debug!(
            escape = %self.escape,
            added = output.chars().count() - input.chars().count(),
            "character stuffed"
        );
        Ok(output)
    }

    /// Collapse each doubled escape character into one.
    ///
    /// A lone escape character, including one at the very end of the input,
    /// is copied through unchanged.
    ///
    /// # Errors
    /// `Error::InputTooLong` if the input has more than `MAX_FRAMED_LEN` characters.
    pub fn destuff(&self, input: &str) -> Result<String> {
        check_len(input.chars().count(), MAX_FRAMED_LEN)?;

        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            output.push(c);
            if c == self.escape && chars.peek() == Some(&self.escape) {
                chars.next();
            }
        }

        Ok(output)
    }
}

impl Default for CharStuffer {
    fn default() -> Self {
        Self::new(DEFAULT_ESCAPE)
    }
}

/// Stuff `input` using [`DEFAULT_ESCAPE`].
pub fn char_stuff(input: &str) -> Result<String> {
    CharStuffer::default().stuff(input)
}

/// Destuff `input` using [`DEFAULT_ESCAPE`].
pub fn char_destuff(input: &str) -> Result<String> {
    CharStuffer::default().destuff(input)
}
