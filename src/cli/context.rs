use std::path::PathBuf;

use outline::{ContextOptions, PageName};
use tracing::instrument;

use super::render::render;

#[derive(Debug, clap::Parser)]
pub struct Context {
    /// The page to show.
    page: String,

    /// Show the page among its siblings.
    #[arg(long, conflicts_with = "children")]
    siblings: bool,

    /// Show the page's children below it.
    #[arg(long)]
    children: bool,

    /// Preview where a new page of this name would go below the page.
    #[arg(long, value_name = "NAME")]
    new: Option<PageName>,
}

impl Context {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;
        let page = super::find(&wiki, &self.page)?;

        let options = ContextOptions {
            with_siblings: self.siblings,
            with_children: self.children,
            pending: self.new,
        };
        let events = wiki.context(&page, &options)?;
        wiki.flush()?;

        for line in render(&events) {
            println!("{line}");
        }

        Ok(())
    }
}
