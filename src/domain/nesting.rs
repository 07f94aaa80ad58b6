//! Nested-list representation of (part of) a page hierarchy.
//!
//! A nesting is a forest. Each element is either a bare page name, or a
//! branch whose head is a page and whose tail is a further forest:
//!
//! ```text
//! [Home, [Projects, Alpha, Beta]], Orphan
//! ```
//!
//! A branch with an empty tail is *elided*: the head has children in the
//! full outline, but they are not part of this fragment.

use serde::{Serialize, Serializer, ser::SerializeSeq};

use crate::domain::PageName;

/// One element of a nesting forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nesting {
    /// A page shown without any subtree.
    Leaf(PageName),
    /// A page followed by (possibly none of) its children.
    Branch(PageName, Vec<Nesting>),
}

impl Nesting {
    /// The page at the top of this element.
    #[must_use]
    pub const fn head(&self) -> &PageName {
        match self {
            Self::Leaf(name) | Self::Branch(name, _) => name,
        }
    }

    /// The children of a branch. Leaves have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Leaf(_) => &[],
            Self::Branch(_, children) => children,
        }
    }

    /// Whether this is a branch whose children were left out.
    #[must_use]
    pub fn is_elided(&self) -> bool {
        matches!(self, Self::Branch(_, children) if children.is_empty())
    }
}

/// Every page in the forest, depth-first, pre-order.
#[must_use]
pub fn flatten(forest: &[Nesting]) -> Vec<&PageName> {
    let mut out = Vec::new();
    let mut stack: Vec<&Nesting> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node.head());
        stack.extend(node.children().iter().rev());
    }
    out
}

/// Append a page at the very bottom of a forest.
///
/// The page becomes a child of the deepest, last element. A trailing leaf
/// is promoted to a branch to hold it; an empty forest gains the page as its
/// only element.
#[must_use]
pub fn deep_append(mut forest: Vec<Nesting>, page: PageName) -> Vec<Nesting> {
    match forest.pop() {
        None => forest.push(Nesting::Leaf(page)),
        Some(Nesting::Leaf(last)) => forest.push(Nesting::Branch(last, vec![Nesting::Leaf(page)])),
        Some(Nesting::Branch(head, children)) => {
            forest.push(Nesting::Branch(head, deep_append(children, page)));
        }
    }
    forest
}

/// Serialises as the classic list-of-lists form: a leaf is a string, a
/// branch is `[head, child, ...]`.
impl Serialize for Nesting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(name) => name.serialize(serializer),
            Self::Branch(head, children) => {
                let mut seq = serializer.serialize_seq(Some(children.len() + 1))?;
                seq.serialize_element(head)?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}
