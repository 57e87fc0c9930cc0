use anyhow::Result;
use argos_shield::presentation::cli::{Cli, run};
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let code = run(cli.command)?;
    Ok(ExitCode::from(code))
}
