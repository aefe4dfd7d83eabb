//! `ledgerlens balances` — Deterministic balance report, no LLM involved.

use ledgerlens_config::AppConfig;
use ledgerlens_store::queries;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = super::load_store(&config)?;

    let balances = queries::outstanding_balances_by_name(&store);

    if balances.is_empty() {
        println!("No customers found.");
        return Ok(());
    }

    let name_width = balances
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("Customer".len());

    println!("{:<name_width$}  Outstanding", "Customer");
    println!("{:-<name_width$}  -----------", "");
    for (name, balance) in &balances {
        println!("{name:<name_width$}  {balance}");
    }

    Ok(())
}
