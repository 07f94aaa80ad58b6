use std::path::PathBuf;

use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Reorder {
    /// The parent whose children are reordered.
    parent: String,

    /// The child to move one place earlier.
    child: String,
}

impl Reorder {
    #[cfg(test)]
    pub fn new(parent: &str, child: &str) -> Self {
        Self {
            parent: parent.to_owned(),
            child: child.to_owned(),
        }
    }

    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;
        let parent = super::find(&wiki, &self.parent)?;
        let child = super::find(&wiki, &self.child)?;

        if wiki.reorder(&parent, &child) {
            wiki.flush()?;
            println!("{}", format!("Moved {child} up under {parent}").success());
        } else if wiki.page(&parent).children().contains(&child) {
            println!("{}", format!("{child} is already first under {parent}").dim());
        } else {
            anyhow::bail!("{child} is not a child of {parent}");
        }

        Ok(())
    }
}
