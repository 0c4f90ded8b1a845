//! Configuration for the framecheck application.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including randomized defaults that are reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it then opens the interactive
//! menu. The seed is always resolved up front so any random choice made
//! during a run can be reproduced with `--seed`.

use framecheck_core::char_stuffing::DEFAULT_ESCAPE;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::session::Operation;

/// What the run should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu loop
    Menu,

    /// Apply one operation to one input and exit
    Run { operation: Operation, input: String },

    /// Batch of random Hamming trials through a noisy channel
    Simulate,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    /// Random seed for error positions and generated payloads
    pub seed: u64,

    /// Escape character for character stuffing
    pub escape: char,

    // === Hamming ===
    /// Explicit 1-based error position (None = random from seed)
    pub error_at: Option<usize>,

    // === Simulation ===
    /// Number of Hamming trials
    pub trials: u64,

    /// Payload length in bits
    pub payload_len: usize,

    // === Behavior ===
    /// Debug-level logging
    pub verbose: bool,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If no --seed is provided, a time-based seed is used and printed by
    /// `print`.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut seed: Option<u64> = None;
        let mut escape: Option<char> = None;
        let mut error_at: Option<usize> = None;
        let mut trials: Option<u64> = None;
        let mut payload_len: Option<usize> = None;
        let mut verbose = false;
        let mut print_config = false;
        let mut print_metrics = true;
        let mut positionals: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--escape" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--escape requires a character".to_string());
                    }
                    let mut chars = args[i].chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => escape = Some(c),
                        _ => return Err("--escape must be exactly one character".to_string()),
                    }
                }
                "--error-at" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--error-at requires a position".to_string());
                    }
                    let position: usize = args[i].parse().map_err(|_| "invalid error-at")?;
                    if position == 0 {
                        return Err("--error-at positions start at 1".to_string());
                    }
                    error_at = Some(position);
                }
                "--trials" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--trials requires a number".to_string());
                    }
                    trials = Some(args[i].parse().map_err(|_| "invalid trials")?);
                }
                "--length" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--length requires a number".to_string());
                    }
                    let len: usize = args[i].parse().map_err(|_| "invalid length")?;
                    if len > framecheck_core::MAX_INPUT_LEN {
                        return Err(format!(
                            "--length must be at most {}",
                            framecheck_core::MAX_INPUT_LEN
                        ));
                    }
                    payload_len = Some(len);
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                arg if arg.starts_with("--") => {
                    return Err(format!("unknown argument: {}", arg));
                }
                _ => positionals.push(args[i].clone()),
            }
            i += 1;
        }

        let command = parse_command(&positionals)?;

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        // Generate defaults using seed
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let config = Config {
            command,
            seed,
            escape: escape.unwrap_or(DEFAULT_ESCAPE),
            error_at,
            trials: trials.unwrap_or(1000),
            payload_len: payload_len.unwrap_or_else(|| rng.gen_range(4..=32)),
            verbose,
            print_config,
            print_metrics,
        };

        Ok(config)
    }

    /// Whether the run draws anything from the seeded RNG.
    ///
    /// Such runs report their seed so they can be repeated with `--seed`.
    pub fn uses_rng(&self) -> bool {
        match &self.command {
            Command::Menu | Command::Simulate => true,
            Command::Run { operation, .. } => {
                *operation == Operation::Hamming && self.error_at.is_none()
            }
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Command: {:?}", self.command);
        println!("Seed: {}", self.seed);
        println!("Escape character: {:?}", self.escape);
        match self.error_at {
            Some(position) => println!("Error position: {}", position),
            None => println!("Error position: (random)"),
        }
        println!();
        println!("=== Simulation ===");
        println!("Trials: {}", self.trials);
        println!("Payload length: {} bits", self.payload_len);
        println!();
    }
}

/// Map positional arguments to a command.
fn parse_command(positionals: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = positionals.split_first() else {
        return Ok(Command::Menu);
    };

    if name == "simulate" {
        if !rest.is_empty() {
            return Err("simulate takes no input".to_string());
        }
        return Ok(Command::Simulate);
    }

    let operation = Operation::from_name(name).ok_or_else(|| format!("unknown command: {}", name))?;

    match rest {
        [input] => Ok(Command::Run {
            operation,
            input: input.clone(),
        }),
        [] => Err(format!("{} requires an input", name)),
        _ => Err(format!("{} takes exactly one input", name)),
    }
}

fn print_help() {
    println!("framecheck: Hamming codes, bit/character stuffing and parity");
    println!();
    println!("USAGE:");
    println!("    framecheck [OPTIONS]                   Interactive menu");
    println!("    framecheck [OPTIONS] <COMMAND> <INPUT>");
    println!("    framecheck [OPTIONS] simulate");
    println!();
    println!("COMMANDS:");
    println!("    bit-stuff <BITS>        Insert a 0 after every five consecutive 1s");
    println!("    bit-destuff <BITS>      Remove stuffed bits");
    println!("    char-stuff <TEXT>       Double every escape character");
    println!("    char-destuff <TEXT>     Collapse doubled escape characters");
    println!("    hamming <BITS>          Encode, inject one error, correct");
    println!("    parity <BITS>           Even/odd parity");
    println!("    ip-to-bin <ADDR>        Decimal or dotted-quad to 32 bits");
    println!("    bin-to-ip <BITS>        32 bits to decimal and dotted-quad");
    println!("    simulate                Random Hamming trials with summary");
    println!();
    println!("OPTIONS:");
    println!("    --seed <N>              Random seed for determinism");
    println!("    --escape <C>            Character stuffing escape (default: D)");
    println!("    --error-at <N>          Hamming error position, 1-based (default: random)");
    println!("    --trials <N>            Simulation trials (default: 1000)");
    println!("    --length <N>            Simulation payload bits (default: random 4-32)");
    println!();
    println!("    --verbose, -v           Debug logging to stderr");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    framecheck                               # Interactive menu");
    println!("    framecheck bit-stuff 0111111011          # One-shot");
    println!("    framecheck hamming 1011 --error-at 4     # Deterministic error");
    println!("    framecheck simulate --seed 42            # Reproducible batch");
    println!();
}
