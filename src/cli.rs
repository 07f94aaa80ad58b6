use std::path::PathBuf;

mod contents;
mod context;
mod create;
mod init;
mod render;
mod reorder;
mod reparent;
mod show;
mod subtopics;
mod terminal;
mod update;
mod validate;

use clap::ArgAction;
use contents::Contents;
use context::Context;
use create::Create;
use outline::{Directory, PageName, Repository, Wiki};
use reorder::Reorder;
use reparent::Reparent;
use show::Show;
use subtopics::Subtopics;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the wiki
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Contents(Contents::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Show the whole hierarchy (default)
    Contents(Contents),

    /// Initialize a new wiki
    Init,

    /// Create a new page
    Create(Create),

    /// Move a page under new parents
    ///
    /// Parent names may be abbreviated. Names that match no page are
    /// ignored; with no parents left the page becomes a root.
    Reparent(Reparent),

    /// Move a page one place earlier among its siblings
    Reorder(Reorder),

    /// Rebuild the outline from every page's declared parents
    Update,

    /// Show where a page sits in the hierarchy
    Context(Context),

    /// Show detailed information about a page
    Show(Show),

    /// Show everything below a page
    Subtopics(Subtopics),

    /// Check the hierarchy for cycles
    Validate(Validate),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Contents(command) => command.run(root)?,
            Self::Init => init::run(&root)?,
            Self::Create(command) => command.run(root)?,
            Self::Reparent(command) => command.run(root)?,
            Self::Reorder(command) => command.run(root)?,
            Self::Update => update::run(root)?,
            Self::Context(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Subtopics(command) => command.run(root)?,
            Self::Validate(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Load the wiki at `root`, with its cached outline if it has one.
fn open(root: PathBuf) -> anyhow::Result<Wiki<Directory>> {
    Ok(Directory::open(root)?.into_wiki())
}

/// Find an existing page from a name typed by the user.
///
/// Case and punctuation are forgiven, but the name must be complete.
fn find(wiki: &Wiki<Directory>, candidate: &str) -> anyhow::Result<PageName> {
    wiki.repository()
        .resolve(candidate, false)
        .ok_or_else(|| anyhow::anyhow!("no page named '{candidate}'"))
}
