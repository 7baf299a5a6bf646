//! Ostinato CLI - command-line interface for the ostinato looper.

mod commands;
mod script;
mod wav;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ostinato")]
#[command(author, version, about = "Ostinato looper CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a footswitch script against an input file
    Render(commands::render::RenderArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
