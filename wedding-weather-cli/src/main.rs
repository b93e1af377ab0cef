//! Binary crate for the `wedding-weather` admin tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive settings configuration (wedding date, venue name)
//! - Human-friendly output of the resolved weather

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
