//! `ledgerlens doctor` — Diagnose configuration, data, and provider health.

use ledgerlens_config::AppConfig;
use ledgerlens_store::{CsvSources, RecordStore};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("LedgerLens Doctor — System Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = match AppConfig::load() {
        Ok(config) => {
            if config_path.exists() {
                println!("  [ok]   Config file valid");
            } else {
                println!("  [ok]   No config file, using defaults (run `ledgerlens init` to create one)");
            }
            config
        }
        Err(e) => {
            println!("  [fail] Config file invalid: {e}");
            return finish(1);
        }
    };

    // Check API key
    if config.has_api_key() {
        println!("  [ok]   API key configured");
    } else {
        println!("  [warn] No API key — set OPENAI_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    // Check data files load
    let sources = CsvSources {
        customers: config.data.customers.clone(),
        invoices: config.data.invoices.clone(),
        payments: config.data.payments.clone(),
    };
    let store = RecordStore::new();
    match store.load_all(&sources) {
        Ok(()) => {
            let (customers, invoices, payments) = store.counts();
            println!(
                "  [ok]   Record sources loaded ({customers} customers, {invoices} invoices, {payments} payments)"
            );
            if customers == 0 {
                println!("  [warn] No customers in {}", config.data.customers.display());
                issues += 1;
            }
        }
        Err(e) => {
            println!("  [fail] Record sources failed to load: {e}");
            issues += 1;
        }
    }

    // Check provider reachability and that the configured model exists
    if config.has_api_key() {
        match super::build_provider(&config) {
            Ok(provider) => match provider.list_models().await {
                Ok(models) => {
                    println!("  [ok]   Provider reachable ({} models available)", models.len());
                    if !models.is_empty() && !models.iter().any(|m| m == &config.model) {
                        println!(
                            "  [warn] Configured model '{}' not in the provider's model list",
                            config.model
                        );
                        issues += 1;
                    }
                }
                Err(e) => {
                    println!("  [fail] Provider unreachable: {e}");
                    issues += 1;
                }
            },
            Err(e) => {
                println!("  [fail] Could not build provider: {e}");
                issues += 1;
            }
        }
    }

    finish(issues)
}

fn finish(issues: u32) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }
    Ok(())
}
