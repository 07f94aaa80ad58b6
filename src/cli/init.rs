use std::{fs, path::Path};

use outline::{Config, storage::{METADATA_DIR, config_path}};
use tracing::instrument;

use super::terminal::Colorize;

#[instrument]
pub fn run(root: &Path) -> anyhow::Result<()> {
    let metadata_dir = root.join(METADATA_DIR);
    if metadata_dir.exists() {
        anyhow::bail!("Wiki already initialized (found existing {METADATA_DIR} directory)");
    }

    fs::create_dir_all(&metadata_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create {METADATA_DIR} directory: {e}"))?;

    Config::default()
        .save(&config_path(root))
        .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

    println!(
        "{}",
        format!("Initialized wiki in {}", root.display()).success()
    );
    println!("  Created: {METADATA_DIR}/config.toml");
    println!();
    println!("Next steps:");
    println!("  outline create \"Home\"");
    println!("  outline create \"Getting Started\" --parent Home");

    Ok(())
}
