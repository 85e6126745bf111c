use anyhow::{Context, Result};

use polyglot_core::AppConfig;

pub fn path() {
    println!("{}", AppConfig::config_path().display());
}

pub fn show(config: &AppConfig) -> Result<()> {
    let mut shown = config.clone();
    if shown.models.api_token.is_some() {
        shown.models.api_token = Some("********".to_string());
    }
    let content = toml::to_string_pretty(&shown).context("Failed to render configuration")?;
    print!("{}", content);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
