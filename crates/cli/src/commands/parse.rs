//! `cinecommand parse` — Offline extraction from completion text.

use std::path::PathBuf;
use tokio::io::AsyncReadExt;

pub async fn run(file: Option<PathBuf>, response: bool) -> Result<(), Box<dyn std::error::Error>> {
    let input = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let text = if response {
        let body: serde_json::Value = serde_json::from_str(&input)?;
        cinecommand_parser::extract_text(&body)
    } else {
        input
    };

    let commands = cinecommand_parser::parse_completion(&text);
    println!("{}", serde_json::to_string_pretty(&commands)?);
    Ok(())
}
