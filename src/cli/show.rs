use std::path::PathBuf;

use clap::Parser;
use outline::PageName;
use serde::Serialize;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display detailed information about a page")]
pub struct Show {
    /// The name of the page to display
    page: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Everything the outline knows about one page.
#[derive(Debug, Serialize)]
struct Summary {
    name: PageName,
    path: Option<PathBuf>,
    parents: Vec<PageName>,
    primary_parent: Option<PageName>,
    ancestors: Vec<PageName>,
    siblings: Vec<PageName>,
    children: Vec<PageName>,
    offspring: Vec<PageName>,
    previous: Option<PageName>,
    next: Option<PageName>,
    first: Option<PageName>,
    last: Option<PageName>,
    show_subtopics: bool,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut wiki = super::open(root)?;
        let name = super::find(&wiki, &self.page)?;

        let path = wiki.repository().path_for(&name).ok();
        let show_subtopics = wiki.subtopics_enabled(&name);
        let page = wiki.page(&name);
        let summary = Summary {
            name: name.clone(),
            path,
            parents: page.parents().to_vec(),
            primary_parent: page.primary_parent().cloned(),
            ancestors: page.ancestors().into_iter().cloned().collect(),
            siblings: page.siblings().into_iter().cloned().collect(),
            children: page.children().to_vec(),
            offspring: page.offspring().into_iter().cloned().collect(),
            previous: page.previous().cloned(),
            next: page.next().cloned(),
            first: page.first().cloned(),
            last: page.last().cloned(),
            show_subtopics,
        };
        wiki.flush()?;

        match self.output {
            OutputFormat::Pretty => output_pretty(&summary),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        }

        Ok(())
    }
}

fn output_pretty(summary: &Summary) {
    println!("# {}", summary.name);
    if let Some(path) = &summary.path {
        println!("{}", path.display().to_string().dim());
    }

    println!("\n{}", "Hierarchy".dim());
    let ancestors = if summary.ancestors.is_empty() {
        "(root)".dim()
    } else {
        join(&summary.ancestors, " > ")
    };
    println!("  Ancestors: {ancestors}");
    println!("  Parents:   {}", or_none(&summary.parents));
    if let Some(primary) = &summary.primary_parent {
        println!("  Primary:   {primary}");
    }
    println!("  Siblings:  {}", or_none(&summary.siblings));
    println!("  Children:  {}", or_none(&summary.children));
    println!("  Offspring: {}", summary.offspring.len());

    println!("\n{}", "Navigation".dim());
    println!("  Previous:  {}", optional(summary.previous.as_ref()));
    println!("  Next:      {}", optional(summary.next.as_ref()));
    println!("  First:     {}", optional(summary.first.as_ref()));
    println!("  Last:      {}", optional(summary.last.as_ref()));

    let subtopics = if summary.show_subtopics { "shown" } else { "hidden" };
    println!("\n  Subtopics: {subtopics}");
}

fn join(pages: &[PageName], separator: &str) -> String {
    pages
        .iter()
        .map(PageName::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn or_none(pages: &[PageName]) -> String {
    if pages.is_empty() {
        "(none)".dim()
    } else {
        join(pages, ", ")
    }
}

fn optional(page: Option<&PageName>) -> String {
    page.map_or_else(|| "(none)".dim(), ToString::to_string)
}
