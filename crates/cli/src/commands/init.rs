//! `ledgerlens init` — Write a default configuration file.

use ledgerlens_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(&config_path, AppConfig::default_toml())?;

    println!("Wrote default config to {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. export OPENAI_API_KEY='sk-...'");
    println!("  2. Point [data] at your customers/invoices/payments CSV files");
    println!("  3. Run `ledgerlens doctor` to verify the setup");

    Ok(())
}
