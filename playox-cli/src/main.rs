//! PlayOX CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP API and browser front end
//! - play: Play a game against the computer in the terminal

mod play;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "playox")]
#[command(about = "Tic-tac-toe against a computer opponent")]
struct Cli {
    /// Seed for the computer opponent (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(server::ServerArgs),
    /// Play in the terminal
    Play,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the terminal game
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args, cli.seed),
        Commands::Play => play::run(cli.seed),
    }
}
