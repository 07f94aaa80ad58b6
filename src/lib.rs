//! Plain-text wiki outlines
//!
//! Pages are markdown documents stored in a directory. Each page declares
//! its own parents; the outline derived from those declarations is cached
//! alongside the pages.

pub mod domain;
pub use domain::{
    Config, ContextOptions, Contents, Nesting, Outline, Page, PageContext, PageName, Repository,
    ViewEvent, Wiki,
};

/// Filesystem storage for pages and the outline cache.
pub mod storage;
pub use storage::Directory;

#[cfg(test)]
mod test_helpers;
