//! `cinecommand models` — Available models.

use super::load_config;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let provider = cinecommand_providers::build_from_config(&config);
    let models = provider.list_models().await?;

    println!("🎬 Models ({})", provider.name());
    for model in models {
        let marker = if model.id == config.default_model { "*" } else { " " };
        println!("  {marker} {:<28} {} — {}", model.id, model.name, model.description);
    }

    Ok(())
}
