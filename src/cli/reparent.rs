use std::path::PathBuf;

use outline::{PageName, Repository};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Reparent {
    /// The page to move.
    page: String,

    /// The new parents. Leave empty to make the page a root.
    parents: Vec<String>,
}

impl Reparent {
    #[cfg(test)]
    pub fn new(page: &str, parents: &[&str]) -> Self {
        Self {
            page: page.to_owned(),
            parents: parents.iter().map(ToString::to_string).collect(),
        }
    }

    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;
        let page = super::find(&wiki, &self.page)?;

        let partial = wiki.config().partial_matching;
        for candidate in self.parents.iter().filter(|c| !c.trim().is_empty()) {
            if wiki.repository().resolve(candidate, partial).is_none() {
                eprintln!("{}", format!("Ignoring unknown page '{candidate}'").warning());
            }
        }

        let parents = wiki.reparent(&page, &self.parents)?;
        wiki.flush()?;

        if parents.is_empty() {
            println!("{}", format!("{page} is now a root page").success());
        } else {
            let names: Vec<&str> = parents.iter().map(PageName::as_str).collect();
            println!(
                "{}",
                format!("Moved {page} under {}", names.join(", ")).success()
            );
        }

        Ok(())
    }
}
