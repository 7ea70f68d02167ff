//! `chiton`: lowest total risk through a cave.
//!
//! Run: cargo run --bin chiton -- input.txt --expect-part1 40

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chiton_cli::{Cli, RunConfig, read_input, render, solve};
use chiton_core::RiskMap;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let text = read_input(&cli.input)?;
    let map = RiskMap::parse(&text)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;
    log::info!("loaded {} risk map", map.extent());

    let answers = solve(&map, &RunConfig::from(&cli))?;
    render(&answers, &mut io::stdout().lock())?;

    if answers.iter().all(|a| a.is_ok()) {
        Ok(ExitCode::SUCCESS)
    } else {
        log::error!("answer mismatch");
        Ok(ExitCode::FAILURE)
    }
}
