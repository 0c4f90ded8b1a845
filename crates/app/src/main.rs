//! framecheck: command-line front end for the framecheck-core primitives.

mod config;
mod input_gen;
mod menu;
mod session;

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Command, Config};
use menu::Menu;
use session::Session;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage");
            return ExitCode::from(2);
        }
    };

    init_tracing(config.verbose);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(config: &Config) -> framecheck_core::Result<()> {
    let mut session = Session::new(config.seed, config.escape);
    info!(seed = config.seed, command = ?config.command, "starting");

    // stderr keeps one-shot stdout to the result alone
    if config.uses_rng() {
        eprintln!("Seed: {}", config.seed);
    }

    match &config.command {
        Command::Menu => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Menu::new(&mut session, stdin.lock(), stdout.lock()).run()?;
        }
        Command::Run { operation, input } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            session.execute(*operation, input, config.error_at, &mut out)?;
            out.flush()?;
            // Single operations have nothing worth summarizing
            return Ok(());
        }
        Command::Simulate => {
            session.simulate(config.trials, config.payload_len);
        }
    }

    let metrics = session.into_metrics();
    if config.print_metrics {
        metrics.print_summary();
    }

    Ok(())
}

/// Log to stderr so stdout carries only results.
///
/// `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
