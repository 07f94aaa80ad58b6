//! Per-page hierarchy queries.

use crate::domain::{Nesting, Outline, PageName};

/// A page's place in the outline.
///
/// Borrowed from a [`Wiki`](crate::Wiki) (or built directly over an
/// [`Outline`]). Every query is answered from the cached outline; none of
/// them touch the pages themselves. A page the outline has never seen has
/// no parents and no children.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    outline: &'a Outline,
    name: &'a PageName,
}

impl<'a> PageContext<'a> {
    /// Queries about `name` against `outline`.
    #[must_use]
    pub const fn new(outline: &'a Outline, name: &'a PageName) -> Self {
        Self { outline, name }
    }

    /// The page these queries are about.
    #[must_use]
    pub const fn name(&self) -> &'a PageName {
        self.name
    }

    /// All of the page's parents, alphabetically.
    #[must_use]
    pub fn parents(&self) -> &'a [PageName] {
        self.outline.parents(self.name)
    }

    /// The page's primary parent.
    #[must_use]
    pub fn primary_parent(&self) -> Option<&'a PageName> {
        self.outline.first_parent(self.name)
    }

    /// The page's direct children, in presentation order.
    #[must_use]
    pub fn children(&self) -> &'a [PageName] {
        self.outline.children(self.name)
    }

    /// The other children of the page's primary parent.
    #[must_use]
    pub fn siblings(&self) -> Vec<&'a PageName> {
        self.outline.siblings(self.name)
    }

    /// The page's primary ancestors, eldest first.
    #[must_use]
    pub fn ancestors(&self) -> Vec<&'a PageName> {
        self.outline.ancestor_line(self.name)
    }

    /// Every page below this one, pre-order.
    #[must_use]
    pub fn offspring(&self) -> Vec<&'a PageName> {
        self.outline.offspring_list(self.name)
    }

    /// The page after this one in the whole-wiki walk.
    #[must_use]
    pub fn next(&self) -> Option<&'a PageName> {
        self.outline.next(self.name)
    }

    /// The page before this one in the whole-wiki walk.
    #[must_use]
    pub fn previous(&self) -> Option<&'a PageName> {
        self.outline.previous(self.name)
    }

    /// The first page of the wiki.
    #[must_use]
    pub fn first(&self) -> Option<&'a PageName> {
        self.outline.first()
    }

    /// The last page of the wiki.
    #[must_use]
    pub fn last(&self) -> Option<&'a PageName> {
        self.outline.last()
    }

    /// Whether the page has neither parents nor children.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.parents().is_empty() && self.children().is_empty()
    }

    /// See [`Outline::ancestors`].
    #[must_use]
    pub fn ancestors_nesting(&self) -> Vec<Nesting> {
        self.outline.ancestors(self.name)
    }

    /// See [`Outline::ancestors_and_siblings`].
    #[must_use]
    pub fn ancestors_and_siblings_nesting(&self) -> Vec<Nesting> {
        self.outline.ancestors_and_siblings(self.name)
    }

    /// See [`Outline::ancestors_and_children`].
    #[must_use]
    pub fn ancestors_and_children_nesting(&self) -> Vec<Nesting> {
        self.outline.ancestors_and_children(self.name)
    }

    /// See [`Outline::children_nesting`].
    #[must_use]
    pub fn children_nesting(&self) -> Vec<Nesting> {
        self.outline.children_nesting(self.name)
    }

    /// The page with all of its offspring below it.
    #[must_use]
    pub fn offspring_nesting(&self) -> Vec<Nesting> {
        self.outline.offspring(std::slice::from_ref(self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outline::ParentMap;

    fn name(s: &str) -> PageName {
        PageName::new(s).unwrap()
    }

    fn strs<'a>(list: impl IntoIterator<Item = &'a PageName>) -> Vec<&'a str> {
        list.into_iter().map(PageName::as_str).collect()
    }

    /// A page with two parents below a three-level tree.
    fn outline() -> Outline {
        let entries: &[(&str, &[&str])] = &[
            ("Home", &[]),
            ("Guides", &["Home"]),
            ("Reference", &["Home"]),
            ("Install", &["Guides"]),
            ("Upgrade", &["Guides", "Reference"]),
            ("Notes", &[]),
        ];
        let parentmap: ParentMap = entries
            .iter()
            .map(|(page, parents)| (name(page), parents.iter().map(|p| name(p)).collect()))
            .collect();
        Outline::new(parentmap)
    }

    #[test]
    fn primary_parent_is_alphabetical_minimum() {
        let outline = outline();
        let upgrade = name("Upgrade");
        let page = PageContext::new(&outline, &upgrade);

        assert_eq!(strs(page.parents()), ["Guides", "Reference"]);
        assert_eq!(page.primary_parent(), Some(&name("Guides")));
    }

    #[test]
    fn ancestor_chain_does_not_branch() {
        let outline = outline();
        let upgrade = name("Upgrade");
        let page = PageContext::new(&outline, &upgrade);

        assert_eq!(strs(page.ancestors()), ["Home", "Guides"]);
    }

    #[test]
    fn siblings_come_from_primary_parent_only() {
        let outline = outline();
        let upgrade = name("Upgrade");
        let page = PageContext::new(&outline, &upgrade);

        assert_eq!(strs(page.siblings()), ["Install"]);
    }

    #[test]
    fn offspring_and_children() {
        let outline = outline();
        let home = name("Home");
        let page = PageContext::new(&outline, &home);

        assert_eq!(strs(page.children()), ["Guides", "Reference"]);
        assert_eq!(
            strs(page.offspring()),
            ["Guides", "Install", "Upgrade", "Reference"]
        );
    }

    #[test]
    fn walk_order() {
        let outline = outline();
        let install = name("Install");
        let page = PageContext::new(&outline, &install);

        assert_eq!(page.previous(), Some(&name("Guides")));
        assert_eq!(page.next(), Some(&name("Upgrade")));
        assert_eq!(page.first(), Some(&name("Home")));
        assert_eq!(page.last(), Some(&name("Notes")));
    }

    #[test]
    fn singleton_and_unknown_pages() {
        let outline = outline();
        let notes = name("Notes");
        let ghost = name("Ghost");

        assert!(PageContext::new(&outline, &notes).is_singleton());

        let page = PageContext::new(&outline, &ghost);
        assert!(page.is_singleton());
        assert!(page.ancestors().is_empty());
        assert_eq!(page.next(), None);
    }
}
