//! `ledgerlens chat` — Interactive or single-message chat mode.

use std::io::{BufRead, Write};
use std::sync::Arc;

use ledgerlens_config::AppConfig;
use ledgerlens_pipeline::ChatSession;
use ledgerlens_tools::default_registry;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = super::build_provider(&config)?;
    let store = super::load_store(&config)?;
    let tools = Arc::new(default_registry(store));

    let mut session = ChatSession::new(provider, &config.model, config.temperature, tools);
    if let Some(max) = config.max_tokens_opt() {
        session = session.with_max_tokens(max);
    }

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let response = session.process(&msg).await?;
        eprint!("\r              \r");
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║      LedgerLens — Financial Analyst Chat     ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:  {}", config.model);
    println!();
    println!("  Example questions:");
    println!("    - Does Acme Automotive have any outstanding balances?");
    println!("    - Summarise Blue Horizon's last 6 months of payment behaviour.");
    println!("    - Which customers owe the most right now?");
    println!();
    println!("  Type your question and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?.trim().to_string();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        eprint!("  ...");
        match session.process(&input).await {
            Ok(response) => {
                eprint!("\r     \r");
                println!();
                for line in response.lines() {
                    println!("  Analyst > {line}");
                }
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
