//! LedgerLens CLI — the main entry point.
//!
//! Commands:
//! - `init`     — Write a default config file
//! - `ask`      — Answer one question through the staged pipeline
//! - `chat`     — Interactive tool-calling chat session
//! - `balances` — Deterministic outstanding-balance report (no LLM)
//! - `doctor`   — Diagnose configuration, data, and provider health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "ledgerlens",
    about = "LedgerLens — billing questions answered from your own records",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Answer a single question through the staged pipeline
    Ask {
        /// The question to answer
        question: String,
    },

    /// Chat with the financial analyst assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Print outstanding balances for every customer
    Balances,

    /// Diagnose configuration, data, and provider health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => commands::init::run()?,
        Commands::Ask { question } => commands::ask::run(&question).await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Balances => commands::balances::run()?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
