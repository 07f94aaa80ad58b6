use std::path::PathBuf;

use clap::Parser;
use outline::PageName;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check the page hierarchy for cycles")]
pub struct Validate {
    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

impl Validate {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;
        let cycles = wiki.outline().cycles();
        wiki.flush()?;

        if cycles.is_empty() {
            if !self.quiet {
                println!("{}", "No cycles found".success());
            }
            return Ok(());
        }

        if !self.quiet {
            println!("{}", format!("Found {} cycle(s):", cycles.len()).warning());
            for cycle in &cycles {
                println!("  - {}", describe(cycle));
            }
        }

        std::process::exit(2);
    }
}

fn describe(cycle: &[PageName]) -> String {
    cycle
        .iter()
        .map(PageName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
