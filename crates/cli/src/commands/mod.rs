pub mod ask;
pub mod balances;
pub mod chat;
pub mod doctor;
pub mod init;

use std::sync::Arc;

use ledgerlens_config::AppConfig;
use ledgerlens_providers::OpenAiCompatProvider;
use ledgerlens_store::{CsvSources, RecordStore};

/// Load the record store from the configured CSV sources.
pub(crate) fn load_store(config: &AppConfig) -> Result<Arc<RecordStore>, Box<dyn std::error::Error>> {
    let sources = CsvSources {
        customers: config.data.customers.clone(),
        invoices: config.data.invoices.clone(),
        payments: config.data.payments.clone(),
    };
    let store = RecordStore::new();
    store.load_all(&sources)?;

    let (customers, invoices, payments) = store.counts();
    tracing::info!(customers, invoices, payments, "Record store loaded");

    Ok(Arc::new(store))
}

/// Build the configured provider, with a readable error when the key
/// is missing.
pub(crate) fn build_provider(
    config: &AppConfig,
) -> Result<Arc<OpenAiCompatProvider>, Box<dyn std::error::Error>> {
    let Some(api_key) = config.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set the environment variable:");
        eprintln!("    export OPENAI_API_KEY='sk-...'");
        eprintln!();
        eprintln!("  Or add api_key to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    Ok(Arc::new(match &config.api_url {
        Some(url) => OpenAiCompatProvider::new("openai", url, api_key),
        None => OpenAiCompatProvider::openai(api_key),
    }))
}
