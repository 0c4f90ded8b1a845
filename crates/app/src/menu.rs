//! Interactive menu loop.
//!
//! Reads choices and inputs line by line, skipping blank lines. Only the
//! first whitespace-separated token of an input line is used. End of input
//! exits the loop like choice 0.

use std::io::{BufRead, Write};

use framecheck_core::Result;
use tracing::debug;

use crate::session::{Operation, Session};

const BANNER: &str = "****************************************************";

/// Drives a [`Session`] from a line-oriented reader.
pub struct Menu<'a, R, W> {
    session: &'a mut Session,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(session: &'a mut Session, input: R, out: W) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_main_menu()?;

            let Some(choice) = self.read_choice()? else {
                writeln!(self.out)?;
                break;
            };
            debug!(%choice, "menu choice");

            match choice {
                '1' => self.sub_menu(
                    "bit",
                    [
                        ("Bit Stuffing", Operation::BitStuff, "Enter binary data for bit stuffing: "),
                        ("Bit Destuffing", Operation::BitDestuff, "Enter binary data for bit destuffing: "),
                    ],
                )?,
                '2' => self.sub_menu(
                    "character",
                    [
                        ("Character Stuffing", Operation::CharStuff, "Enter data for character stuffing: "),
                        ("Character Destuffing", Operation::CharDestuff, "Enter data for character destuffing: "),
                    ],
                )?,
                '3' => self.prompt_and_execute(Operation::Hamming, "Enter binary data for Hamming Code: ")?,
                '4' => self.sub_menu(
                    "IPv4 conversion",
                    [
                        ("Decimal to Binary", Operation::IpToBin, "Enter IPv4 decimal address: "),
                        ("Binary to Decimal", Operation::BinToIp, "Enter IPv4 binary address (32 bits): "),
                    ],
                )?,
                '5' => self.prompt_and_execute(Operation::Parity, "Enter binary data for parity check: ")?,
                '0' => {
                    writeln!(self.out, "Exiting the program.")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid choice. Please enter a valid option.")?,
            }
        }

        let metrics = self.session.metrics();
        debug!(
            operations = metrics.operations,
            rejected = metrics.inputs_rejected,
            "menu closed"
        );
        Ok(())
    }

    fn print_main_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", BANNER)?;
        writeln!(self.out, "Choose an operation:")?;
        writeln!(self.out, "1. Bit Operations")?;
        writeln!(self.out, "2. Character Operations")?;
        writeln!(self.out, "3. Hamming Code (Error Detection & Correction)")?;
        writeln!(self.out, "4. IPv4 Conversion (Decimal to Binary and vice versa)")?;
        writeln!(self.out, "5. Parity Checker")?;
        writeln!(self.out, "0. Exit")?;
        writeln!(self.out, "{}", BANNER)?;
        write!(self.out, "Enter your choice: ")?;
        self.out.flush()?;
        Ok(())
    }

    /// Offer choices `a` and `b`, then prompt for input and execute.
    fn sub_menu(&mut self, kind: &str, options: [(&str, Operation, &str); 2]) -> Result<()> {
        writeln!(self.out, "Choose {} operation:", kind)?;
        writeln!(self.out, "a. {}", options[0].0)?;
        writeln!(self.out, "b. {}", options[1].0)?;
        write!(self.out, "Enter your choice: ")?;
        self.out.flush()?;

        let (_, operation, prompt) = match self.read_choice()? {
            Some('a') => options[0],
            Some('b') => options[1],
            Some(_) => {
                writeln!(self.out, "Invalid choice for {} operation.", kind)?;
                return Ok(());
            }
            None => return Ok(()),
        };

        self.prompt_and_execute(operation, prompt)
    }

    fn prompt_and_execute(&mut self, operation: Operation, prompt: &str) -> Result<()> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let Some(token) = self.read_token()? else {
            return Ok(());
        };

        match self.session.execute(operation, &token, None, &mut self.out) {
            Ok(()) => Ok(()),
            Err(e @ framecheck_core::Error::Io(_)) => Err(e),
            Err(e) => {
                writeln!(self.out, "Error: {}", e)?;
                Ok(())
            }
        }
    }

    /// First non-whitespace character of the next line, skipping blank lines.
    fn read_choice(&mut self) -> Result<Option<char>> {
        while let Some(line) = self.read_line()? {
            if let Some(c) = line.trim().chars().next() {
                return Ok(Some(c));
            }
        }
        Ok(None)
    }

    /// First whitespace-separated token of the next non-blank line.
    fn read_token(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.read_line()? {
            if let Some(token) = line.split_whitespace().next() {
                return Ok(Some(token.to_string()));
            }
        }
        Ok(None)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
