//! `P3dKit` CLI - Command-line interface for inspecting P3D files

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "p3dkit", version = crate::VERSION)]
#[command(about = "P3dKit: Pure3D chunk file inspection tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the `P3dKit` CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
