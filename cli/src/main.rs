//! Terminal shell for the Sum-10 puzzle.
//!
//! Reads commands from stdin, one per line, and redraws the board after each.

mod command;
mod render;
mod shell;

use std::io::{self, BufRead};

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sumten_core::GameSession;
use tracing_subscriber::EnvFilter;

use command::Command;
use shell::{Flow, Shell};

#[derive(Parser, Debug)]
#[command(version, about = "Pair up cells that sum to 10")]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Seed for the first board and every restart after it
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print each frame as a JSON snapshot instead of a text grid
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = verbose.log_level_filter().to_string().to_lowercase();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::new(level))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting session with seed {}", seed);

    let mut shell = Shell::new(GameSession::new(seed), args.json);
    let mut stdout = io::stdout().lock();
    shell.draw(&mut stdout)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        if shell.run(command, &mut stdout)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}
