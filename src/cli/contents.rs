use std::path::PathBuf;

use tracing::instrument;

use super::{render::render, terminal::Colorize};

#[derive(Debug, Default, clap::Parser)]
pub struct Contents {
    /// Mark this page as the current one.
    #[arg(long)]
    here: Option<String>,
}

impl Contents {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;
        let here = self
            .here
            .map(|name| super::find(&wiki, &name))
            .transpose()?;

        let contents = wiki.contents(here.as_ref());
        wiki.flush()?;

        if contents.tree.is_empty() && contents.singletons.is_empty() {
            println!("{}", "No pages".dim());
            return Ok(());
        }

        for line in render(&contents.tree) {
            println!("{line}");
        }

        if !contents.singletons.is_empty() {
            if !contents.tree.is_empty() {
                println!();
            }
            println!("{}", "Singletons".dim());
            for page in &contents.singletons {
                let marker = if here.as_ref() == Some(page) && wiki.config().show_current {
                    format!(" {}", "◀".success())
                } else {
                    String::new()
                };
                println!("- {page}{marker}");
            }
        }

        Ok(())
    }
}
