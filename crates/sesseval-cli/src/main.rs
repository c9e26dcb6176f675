//! sesseval CLI application
//!
//! Compares per-session binary predictions against ground-truth labels and
//! prints recall, precision, accuracy and F1 averaged over sessions and over
//! the pooled data.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/sesseval-cli
//! ```
//!
//! # Usage
//!
//! - `sesseval` evaluates `submission/sample/Session{02,03,15,16}`
//! - `sesseval --base-dir data --sessions 1,2,3` evaluates other sessions
//! - `sesseval --discover` evaluates every complete session directory
//! - `sesseval config init` writes a config file with the defaults
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) for per-file logging.

mod args;
mod commands;
mod console;
mod router;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout can be piped
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    router::route(cli)
}
