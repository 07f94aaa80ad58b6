use std::path::PathBuf;

use outline::PageName;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Create {
    /// The name of the new page.
    name: PageName,

    /// A parent page. May be abbreviated, and given more than once.
    #[clap(long, short)]
    parent: Vec<String>,

    /// The body text of the page.
    #[clap(long, short)]
    body: Option<String>,
}

impl Create {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;

        let page = wiki.create_page(self.name, &self.parent, self.body.unwrap_or_default())?;
        wiki.flush()?;

        println!("{}", format!("Created page {}", page.name()).success());
        if let Ok(path) = wiki.repository().path_for(page.name()) {
            println!("  Path:    {}", path.display());
        }
        if page.parents().is_empty() {
            println!("  Parents: {}", "(none)".dim());
        } else {
            println!("  Parents: {}", page.parents().join(", "));
        }

        Ok(())
    }
}
