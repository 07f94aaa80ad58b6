use std::path::PathBuf;

use tracing::instrument;

use super::{render::render, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Subtopics {
    /// The page whose subtopics to show.
    page: String,

    /// Show only the direct children.
    #[arg(long, conflicts_with = "include_self")]
    children: bool,

    /// Show the page itself above its offspring, whatever its subtopics
    /// setting.
    #[arg(long)]
    include_self: bool,
}

impl Subtopics {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;
        let page = super::find(&wiki, &self.page)?;

        let events = if self.children {
            wiki.children(&page)
        } else if self.include_self {
            wiki.offspring(&page, false)
        } else {
            wiki.subtopics(&page)
        };
        wiki.flush()?;

        if events.is_empty() {
            println!("{}", "No subtopics".dim());
        }
        for line in render(&events) {
            println!("{line}");
        }

        Ok(())
    }
}
