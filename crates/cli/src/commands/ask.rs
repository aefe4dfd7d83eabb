//! `ledgerlens ask` — One question through the staged pipeline.

use ledgerlens_config::AppConfig;
use ledgerlens_pipeline::StagedPipeline;

pub async fn run(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = super::build_provider(&config)?;
    let store = super::load_store(&config)?;

    let pipeline = StagedPipeline::new(provider, store, &config.model);

    eprint!("  Thinking...");
    let answer = pipeline.answer(question).await?;
    eprint!("\r              \r");
    println!("{answer}");

    Ok(())
}
