//! Path utilities for pages
//!
//! Every page lives in a file named after its canonical id: `Front Page` is
//! stored as `FrontPage.md`. New pages are created in the wiki root; existing
//! ones may be moved into subdirectories. Wiki metadata (configuration and
//! the outline cache) lives in `<root>/.wiki/`.

use std::path::{Path, PathBuf};

use crate::domain::PageName;

/// Directory holding wiki metadata, relative to the root.
pub const METADATA_DIR: &str = ".wiki";

/// Parse the page id from a file path.
///
/// # Errors
///
/// Returns an error if the path is not a markdown file with a UTF-8 stem.
pub fn parse_id_from_path(path: &Path) -> Result<&str, ParseError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
        return Err(ParseError::NotMarkdown);
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::InvalidPath)
}

/// Construct the file path for a page.
///
/// # Errors
///
/// Returns an error if the page name has no letters or digits, so no file
/// name can be derived from it.
pub fn construct_path_from_name(root: &Path, name: &PageName) -> Result<PathBuf, ParseError> {
    let id = name.canonical_id();
    if id.is_empty() {
        return Err(ParseError::NoId(name.clone()));
    }
    Ok(root.join(id).with_extension("md"))
}

/// Where the wiki configuration is stored.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(METADATA_DIR).join("config.toml")
}

/// Where the outline cache is stored.
#[must_use]
pub fn cache_path(root: &Path) -> PathBuf {
    root.join(METADATA_DIR).join("outline.json")
}

/// Errors that can occur when mapping between pages and paths.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The path is not a markdown file.
    #[error("not a markdown file")]
    NotMarkdown,
    /// The file name could not be read.
    #[error("invalid file name")]
    InvalidPath,
    /// The page name has nothing to build a file name from.
    #[error("page name '{0}' has no letters or digits")]
    NoId(PageName),
}
