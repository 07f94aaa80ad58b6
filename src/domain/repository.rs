//! The boundary between the outline engine and whatever stores the pages.
//!
//! The engine never reads or writes pages directly. It asks a
//! [`Repository`] for the pages, for name resolution, and to persist cleaned
//! parent lists. [`Directory`](crate::Directory) is the filesystem
//! implementation.

use std::io;

use crate::domain::{PageName, name::canonical_id};

/// A member of the page hierarchy.
pub trait Node {
    /// The node's name.
    fn name(&self) -> &PageName;

    /// The node's raw, uncleaned parent declaration.
    fn declared_parents(&self) -> &[String];

    /// Whether this node wants its subtopics shown, if it says at all.
    fn show_subtopics(&self) -> Option<bool> {
        None
    }
}

/// A collection of nodes the outline is derived from.
pub trait Repository {
    /// The node type stored in this repository.
    type Node: Node;

    /// All nodes in the collection, in no particular order.
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Look up a single node by exact name.
    fn node(&self, name: &PageName) -> Option<&Self::Node>;

    /// Resolve a candidate name to the name of an existing node.
    ///
    /// Resolution may be fuzzy (case-insensitive, by id) and, when
    /// `allow_partial` is set, may match part of a name. Returns `None` if
    /// nothing matches.
    fn resolve(&self, candidate: &str, allow_partial: bool) -> Option<PageName>;

    /// Persist a cleaned parent list onto a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be written back to storage.
    fn set_parents(&mut self, name: &PageName, parents: &[PageName]) -> io::Result<()>;
}

/// Resolve a candidate name against a set of known names.
///
/// Tried in order: the exact name, the canonical id (so `"my page"` finds
/// `"My Page"`), the name ignoring case, and finally (with `allow_partial`)
/// the alphabetically first name containing the candidate, ignoring case.
/// Blank candidates never resolve.
pub fn resolve_name<'a, I>(names: I, candidate: &str, allow_partial: bool) -> Option<PageName>
where
    I: IntoIterator<Item = &'a PageName>,
{
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    let names: Vec<&PageName> = names.into_iter().collect();
    let id = canonical_id(candidate);
    let lower = candidate.to_lowercase();

    let found = names
        .iter()
        .find(|name| name.as_str() == candidate)
        .or_else(|| {
            names
                .iter()
                .find(|name| !id.is_empty() && name.canonical_id() == id)
        })
        .or_else(|| names.iter().find(|name| name.to_lowercase() == lower))
        .or_else(|| {
            names
                .iter()
                .filter(|name| allow_partial && name.to_lowercase().contains(&lower))
                .min()
        })?;

    Some((*found).clone())
}
