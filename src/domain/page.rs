use crate::domain::{repository::Node, PageName};

/// A wiki page.
///
/// A page carries its own list of declared parents. This list is the only
/// persisted source of truth for the page hierarchy; everything in the
/// [`Outline`](crate::Outline) is derived from it.
///
/// The declared parents are raw strings as written by whoever last edited
/// the page. They may be dangling, duplicated, or name the page itself.
/// They are cleaned when the outline is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    name: PageName,
    parents: Vec<String>,
    show_subtopics: Option<bool>,
    body: String,
}

impl Page {
    /// Construct a new [`Page`] with no parents.
    #[must_use]
    pub const fn new(name: PageName, body: String) -> Self {
        Self {
            name,
            parents: Vec::new(),
            show_subtopics: None,
            body,
        }
    }

    /// Construct a [`Page`] with the given raw parent declaration.
    #[must_use]
    pub fn with_parents<I, S>(name: PageName, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parents: parents.into_iter().map(Into::into).collect(),
            ..Self::new(name, String::new())
        }
    }

    /// The page name.
    #[must_use]
    pub const fn name(&self) -> &PageName {
        &self.name
    }

    /// The declared parents, exactly as stored on the page.
    #[must_use]
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Replace the declared parents.
    pub fn set_parents<I, S>(&mut self, parents: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
    }

    /// The page's own `show_subtopics` setting, if any.
    #[must_use]
    pub const fn show_subtopics(&self) -> Option<bool> {
        self.show_subtopics
    }

    /// Set, or clear, the page's `show_subtopics` setting.
    pub const fn set_show_subtopics(&mut self, value: Option<bool>) {
        self.show_subtopics = value;
    }

    /// The markdown body of the page.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (PageName, Vec<String>, Option<bool>, String) {
        (self.name, self.parents, self.show_subtopics, self.body)
    }

    pub(crate) const fn from_parts(
        name: PageName,
        parents: Vec<String>,
        show_subtopics: Option<bool>,
        body: String,
    ) -> Self {
        Self {
            name,
            parents,
            show_subtopics,
            body,
        }
    }
}

impl Node for Page {
    fn name(&self) -> &PageName {
        &self.name
    }

    fn declared_parents(&self) -> &[String] {
        &self.parents
    }

    fn show_subtopics(&self) -> Option<bool> {
        self.show_subtopics
    }
}
