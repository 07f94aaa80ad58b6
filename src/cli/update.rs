use std::path::PathBuf;

use tracing::instrument;

use super::terminal::Colorize;

#[instrument]
pub fn run(root: PathBuf) -> anyhow::Result<()> {
    let mut wiki = super::open(root)?;

    let result = wiki.update();
    wiki.flush()?;
    let cleaned = result?;

    if cleaned.is_empty() {
        println!("{}", "Outline rebuilt, all parents were valid".success());
    } else {
        println!("Outline rebuilt, cleaned parents of:");
        for page in &cleaned {
            println!("  - {page}");
        }
    }

    Ok(())
}
