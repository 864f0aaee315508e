//! Keypad Session
//!
//! Replays a key sequence through the engine and prints both display lines
//! after every key.
//!
//! Run with:
//!
//! ```bash
//! cargo run --example keypad_session -- "12+30="
//! cargo run --example keypad_session -- 5 / 0 Enter 7 --json
//! RUST_LOG=keypad_calculator=debug cargo run --example keypad_session -- "0.1+0.2="
//! ```

use std::process::ExitCode;

use clap::Parser;
use keypad_calculator::prelude::*;
use tracing_subscriber::EnvFilter;

/// Replay calculator keys and show the display
#[derive(Debug, Parser)]
#[command(name = "keypad-session", version)]
struct Cli {
    /// Keys to press: single characters ("12+30=") or key names (Enter, Escape, Backspace)
    #[arg(required = true)]
    keys: Vec<String>,

    /// Display limits as JSON, e.g. '{"max_input_length": 8}'
    #[arg(long)]
    limits: Option<String>,

    /// Print the final engine state as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> CalcResult<()> {
    let mut engine = match &cli.limits {
        Some(json) => CalculatorEngine::with_limits(DisplayLimits::from_json(json)?)?,
        None => CalculatorEngine::new(),
    };

    for key in expand_keys(&cli.keys) {
        let Some(action) = Keypad::key_to_action(&key) else {
            tracing::warn!(%key, "no keypad action for key");
            continue;
        };
        let feedback = engine.press(action);
        println!(
            "{:>9} | {:<24} | {:<22} | {:?}",
            action.label(),
            engine.operation_line(),
            engine.result_line(),
            feedback
        );
    }

    if cli.json {
        println!("{}", engine.snapshot().to_json()?);
    }
    Ok(())
}

/// Named keys pass through whole; anything else is split into characters
fn expand_keys(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| {
            if Keypad::key_to_action(arg).is_some() {
                vec![arg.clone()]
            } else {
                arg.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(String::from)
                    .collect()
            }
        })
        .collect()
}
