//! Flatten a nesting into a sequence of view events.
//!
//! Renderers walk the events in order and never need to recurse. An `Open`
//! is always matched by a later `Close`; everything between them belongs to
//! the opened page.

use serde::Serialize;

use crate::domain::{Nesting, PageName};

/// A page as it should be presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// The page being shown.
    pub page: PageName,
    /// Whether this is the highlighted ("you are here") page.
    pub current: bool,
    /// Whether the renderer should link to the page.
    pub linked: bool,
}

/// One step of a projected nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewEvent {
    /// A page whose children follow, up to the matching [`ViewEvent::Close`].
    Open {
        /// The page that heads the group.
        entry: Entry,
    },
    /// A page shown on its own.
    Leaf {
        /// The page.
        entry: Entry,
    },
    /// End of the most recently opened group.
    Close,
    /// The preceding page has children that were left out of this fragment.
    Elided,
}

/// How the highlighted page is treated during projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projection<'a> {
    /// The page to mark as current.
    pub highlight: Option<&'a PageName>,
    /// Show the current page, but without a link.
    pub suppress_link: bool,
    /// Leave the current page out entirely.
    ///
    /// A fragment consisting of just the current page projects to nothing;
    /// a group headed by the current page keeps its children but loses its
    /// own `Open`/`Close`.
    pub suppress_current: bool,
}

impl<'a> Projection<'a> {
    /// Highlight the given page.
    #[must_use]
    pub const fn highlighting(page: &'a PageName) -> Self {
        Self {
            highlight: Some(page),
            suppress_link: false,
            suppress_current: false,
        }
    }

    fn is_current(&self, page: &PageName) -> bool {
        self.highlight == Some(page)
    }

    fn hides(&self, page: &PageName) -> bool {
        self.suppress_current && self.is_current(page)
    }

    fn entry(&self, page: &PageName) -> Entry {
        let current = self.is_current(page);
        Entry {
            page: page.clone(),
            current,
            linked: !(current && self.suppress_link),
        }
    }
}

/// Project a nesting into view events.
///
/// This is a pure function of its input.
#[must_use]
pub fn project(nesting: &[Nesting], projection: Projection<'_>) -> Vec<ViewEvent> {
    if let [Nesting::Leaf(only)] = nesting {
        if projection.hides(only) {
            return Vec::new();
        }
    }

    let mut events = Vec::new();
    for element in nesting {
        push_element(element, &projection, &mut events);
    }
    events
}

fn push_element(element: &Nesting, projection: &Projection<'_>, events: &mut Vec<ViewEvent>) {
    match element {
        Nesting::Leaf(page) => events.push(ViewEvent::Leaf {
            entry: projection.entry(page),
        }),
        Nesting::Branch(head, _) if element.is_elided() => {
            events.push(ViewEvent::Leaf {
                entry: projection.entry(head),
            });
            events.push(ViewEvent::Elided);
        }
        Nesting::Branch(head, children) => {
            let shown = !projection.hides(head);
            if shown {
                events.push(ViewEvent::Open {
                    entry: projection.entry(head),
                });
            }
            for child in children {
                push_element(child, projection, events);
            }
            if shown {
                events.push(ViewEvent::Close);
            }
        }
    }
}
