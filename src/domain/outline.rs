//! The cached page hierarchy.
//!
//! The [`Outline`] knows nothing about pages, storage, or name resolution.
//! It is built from a *parent map* (page name to cleaned parent list) and
//! derives from it a *child map* and a [`Nesting`] forest that are cheap to
//! query.
//!
//! Child order is a presentation order. It is not derived from the parent
//! map, so it is preserved across [`Outline::update`] by seeding the new
//! child map from the old one, and it can be changed with
//! [`Outline::reorder`].

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{algo::tarjan_scc, graphmap::DiGraphMap};
use tracing::instrument;

use crate::domain::{
    nesting::{self, Nesting},
    PageName,
};

/// Mapping from each page to its sorted, cleaned parents.
pub type ParentMap = BTreeMap<PageName, Vec<PageName>>;

/// Mapping from each page to its children, in presentation order.
pub type ChildMap = BTreeMap<PageName, Vec<PageName>>;

/// A derived, cached view of the page hierarchy.
///
/// - `parentmap`: every known page, with its parents sorted alphabetically.
///   The first parent is the page's *primary* parent.
/// - `childmap`: for each page with children, every page that lists it as a
///   parent. Pages without children have no entry.
/// - `nesting`: the forest of all pages, each placed once under its primary
///   parent. Pages with no parents are roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    parentmap: ParentMap,
    childmap: ChildMap,
    nesting: Vec<Nesting>,
}

impl Outline {
    /// Build an outline from a parent map.
    #[must_use]
    pub fn new(parentmap: ParentMap) -> Self {
        let mut outline = Self::default();
        outline.update(parentmap);
        outline
    }

    /// Rebuild an outline from a parent map, using `childmap` as the
    /// ordering hint for children.
    ///
    /// Used to restore a cached outline. Entries in `childmap` that are not
    /// backed by `parentmap` are discarded.
    #[must_use]
    pub fn with_childmap(parentmap: ParentMap, childmap: ChildMap) -> Self {
        let mut outline = Self {
            parentmap: ParentMap::new(),
            childmap,
            nesting: Vec::new(),
        };
        outline.update(parentmap);
        outline
    }

    /// Replace the parent map and regenerate everything derived from it.
    ///
    /// Parent lists are sorted and deduplicated, and references to unknown
    /// pages or to the page itself are dropped.
    ///
    /// Children that were already present in the old child map keep their
    /// relative order. New children are appended after them, alphabetically.
    /// The result depends only on `parentmap` and the previous child map,
    /// so updating twice with the same map is a no-op.
    #[instrument(skip_all, fields(pages = parentmap.len()))]
    pub fn update(&mut self, parentmap: ParentMap) {
        let parentmap = normalise(parentmap);

        let mut childmap = ChildMap::new();
        for (parent, old_children) in &self.childmap {
            if !parentmap.contains_key(parent) {
                continue;
            }
            let mut kept: Vec<PageName> = Vec::with_capacity(old_children.len());
            for child in old_children {
                let still_child = parentmap
                    .get(child)
                    .is_some_and(|parents| parents.contains(parent));
                if still_child && !kept.contains(child) {
                    kept.push(child.clone());
                }
            }
            if !kept.is_empty() {
                childmap.insert(parent.clone(), kept);
            }
        }

        for (child, parents) in &parentmap {
            for parent in parents {
                let children = childmap.entry(parent.clone()).or_default();
                if !children.contains(child) {
                    children.push(child.clone());
                }
            }
        }

        self.parentmap = parentmap;
        self.childmap = childmap;
        self.nesting = self.build_nesting();

        tracing::debug!(
            roots = self.nesting.len(),
            parents = self.childmap.len(),
            "outline updated"
        );
    }

    /// Move a page under a new set of parents.
    ///
    /// The page is removed from the child list of every parent it no longer
    /// has and appended to the end of the child list of every parent it
    /// gains. Other siblings are never reordered. An empty parent list makes
    /// the page a root. A page not yet in the outline is added.
    ///
    /// Parents are filtered as in [`Outline::update`].
    #[instrument(skip_all, fields(page = %page))]
    pub fn reparent(&mut self, page: &PageName, parents: &[PageName]) {
        let mut new_parents: Vec<PageName> = parents
            .iter()
            .filter(|parent| *parent != page && self.parentmap.contains_key(*parent))
            .cloned()
            .collect();
        new_parents.sort();
        new_parents.dedup();

        let old_parents = self
            .parentmap
            .insert(page.clone(), new_parents.clone())
            .unwrap_or_default();

        for parent in old_parents.iter().filter(|p| !new_parents.contains(*p)) {
            if let Some(children) = self.childmap.get_mut(parent) {
                children.retain(|child| child != page);
                if children.is_empty() {
                    self.childmap.remove(parent);
                }
            }
        }

        for parent in new_parents.iter().filter(|p| !old_parents.contains(*p)) {
            let children = self.childmap.entry(parent.clone()).or_default();
            if !children.contains(page) {
                children.push(page.clone());
            }
        }

        self.nesting = self.build_nesting();

        tracing::debug!(from = ?old_parents, to = ?new_parents, "reparented");
    }

    /// Move `child` one place earlier among the children of `parent`.
    ///
    /// Returns `false`, changing nothing, if `child` is not a child of
    /// `parent` or is already first.
    #[instrument(skip_all, fields(parent = %parent, child = %child))]
    pub fn reorder(&mut self, parent: &PageName, child: &PageName) -> bool {
        let Some(children) = self.childmap.get_mut(parent) else {
            return false;
        };
        let Some(index) = children.iter().position(|c| c == child) else {
            return false;
        };
        if index == 0 {
            return false;
        }

        children.swap(index - 1, index);
        self.nesting = self.build_nesting();
        true
    }

    /// The parent map.
    #[must_use]
    pub const fn parentmap(&self) -> &ParentMap {
        &self.parentmap
    }

    /// The child map.
    #[must_use]
    pub const fn childmap(&self) -> &ChildMap {
        &self.childmap
    }

    /// The whole hierarchy as a nesting forest.
    #[must_use]
    pub fn nesting(&self) -> &[Nesting] {
        &self.nesting
    }

    /// Whether the page is known to the outline.
    #[must_use]
    pub fn contains(&self, page: &PageName) -> bool {
        self.parentmap.contains_key(page)
    }

    /// The page's parents, alphabetically. Unknown pages have none.
    #[must_use]
    pub fn parents(&self, page: &PageName) -> &[PageName] {
        self.parentmap.get(page).map_or(&[], Vec::as_slice)
    }

    /// The page's primary (alphabetically first) parent.
    #[must_use]
    pub fn first_parent(&self, page: &PageName) -> Option<&PageName> {
        self.parents(page).first()
    }

    /// The page's children, in presentation order.
    #[must_use]
    pub fn children(&self, page: &PageName) -> &[PageName] {
        self.childmap.get(page).map_or(&[], Vec::as_slice)
    }

    /// Other children of the page's primary parent.
    ///
    /// Pages sharing only a non-primary parent are not siblings.
    #[must_use]
    pub fn siblings(&self, page: &PageName) -> Vec<&PageName> {
        self.first_parent(page)
            .map(|parent| self.children(parent).iter().filter(|c| *c != page).collect())
            .unwrap_or_default()
    }

    /// Pages with no parents, alphabetically.
    pub fn roots(&self) -> impl Iterator<Item = &PageName> {
        self.parentmap
            .iter()
            .filter(|(_, parents)| parents.is_empty())
            .map(|(page, _)| page)
    }

    /// The page's primary ancestors, eldest first, not including the page.
    ///
    /// Only the primary-parent line is followed. The walk stops if it
    /// revisits a page, so a cycle cannot make it loop.
    #[must_use]
    pub fn ancestor_line(&self, page: &PageName) -> Vec<&PageName> {
        let mut line = Vec::new();
        let mut seen = BTreeSet::from([page]);
        let mut current = page;
        while let Some(parent) = self.first_parent(current) {
            if !seen.insert(parent) {
                break;
            }
            line.push(parent);
            current = parent;
        }
        line.reverse();
        line
    }

    /// A nesting of the page's primary ancestor line, ending at the page.
    #[must_use]
    pub fn ancestors(&self, page: &PageName) -> Vec<Nesting> {
        vec![self.wrap_in_ancestors(page, self.collapsed(page))]
    }

    /// Like [`Outline::ancestors`], but the page is shown among all the
    /// children of its primary parent.
    #[must_use]
    pub fn ancestors_and_siblings(&self, page: &PageName) -> Vec<Nesting> {
        let Some(parent) = self.first_parent(page) else {
            return self.ancestors(page);
        };
        let level = self
            .children(parent)
            .iter()
            .map(|child| self.collapsed(child))
            .collect();
        vec![self.wrap_in_ancestors(parent, Nesting::Branch(parent.clone(), level))]
    }

    /// Like [`Outline::ancestors`], but the page is expanded to show its
    /// direct children.
    #[must_use]
    pub fn ancestors_and_children(&self, page: &PageName) -> Vec<Nesting> {
        let children = self.children(page);
        let node = if children.is_empty() {
            Nesting::Leaf(page.clone())
        } else {
            Nesting::Branch(
                page.clone(),
                children.iter().map(|child| self.collapsed(child)).collect(),
            )
        };
        vec![self.wrap_in_ancestors(page, node)]
    }

    /// The page's direct children, as leaves.
    #[must_use]
    pub fn children_nesting(&self, page: &PageName) -> Vec<Nesting> {
        self.children(page)
            .iter()
            .map(|child| Nesting::Leaf(child.clone()))
            .collect()
    }

    /// The full subtrees below each of the given pages.
    ///
    /// Every child is followed, not only primary ones, but no page appears
    /// twice.
    #[must_use]
    pub fn offspring(&self, pages: &[PageName]) -> Vec<Nesting> {
        let mut visited = BTreeSet::new();
        pages
            .iter()
            .filter(|page| self.contains(page))
            .map(|page| self.subtree(page, &mut visited, false))
            .collect()
    }

    /// All proper descendants of the page, pre-order.
    #[must_use]
    pub fn offspring_list(&self, page: &PageName) -> Vec<&PageName> {
        let Some((page, _)) = self.parentmap.get_key_value(page) else {
            return Vec::new();
        };
        let mut visited = BTreeSet::new();
        let mut out = Vec::new();
        self.collect_descendants(page, &mut visited, &mut out);
        out
    }

    /// The first page in the hierarchy.
    #[must_use]
    pub fn first(&self) -> Option<&PageName> {
        nesting::flatten(&self.nesting).first().copied()
    }

    /// The last page in the hierarchy.
    #[must_use]
    pub fn last(&self) -> Option<&PageName> {
        nesting::flatten(&self.nesting).last().copied()
    }

    /// The page after this one in a depth-first walk of the hierarchy.
    #[must_use]
    pub fn next(&self, page: &PageName) -> Option<&PageName> {
        let flat = nesting::flatten(&self.nesting);
        let index = flat.iter().position(|p| *p == page)?;
        flat.get(index + 1).copied()
    }

    /// The page before this one in a depth-first walk of the hierarchy.
    #[must_use]
    pub fn previous(&self, page: &PageName) -> Option<&PageName> {
        let flat = nesting::flatten(&self.nesting);
        let index = flat.iter().position(|p| *p == page)?;
        index.checked_sub(1).and_then(|i| flat.get(i).copied())
    }

    /// Groups of pages that are their own ancestors.
    ///
    /// Cycles are tolerated, not repaired: the alphabetically first page
    /// caught in one heads its own tree in the nesting. This is for
    /// diagnostics only.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<PageName>> {
        let mut graph: DiGraphMap<&PageName, ()> = DiGraphMap::new();
        for (child, parents) in &self.parentmap {
            graph.add_node(child);
            for parent in parents {
                graph.add_edge(child, parent, ());
            }
        }

        let mut cycles: Vec<Vec<PageName>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|node| graph.contains_edge(*node, *node))
            })
            .map(|component| {
                let mut names: Vec<PageName> = component.into_iter().cloned().collect();
                names.sort();
                names
            })
            .collect();

        cycles.sort();
        cycles
    }
}

impl Outline {
    fn build_nesting(&self) -> Vec<Nesting> {
        let mut visited = BTreeSet::new();
        let roots: Vec<&PageName> = self.roots().collect();
        let mut nesting: Vec<Nesting> = roots
            .into_iter()
            .map(|root| self.subtree(root, &mut visited, true))
            .collect();

        // Pages with no route from a root sit in or below a cycle. The cycle
        // heads its own tree so that no page goes missing.
        for page in self.parentmap.keys() {
            if visited.contains(page) {
                continue;
            }
            let head = self.cycle_head(page);
            let head = if visited.contains(head) { page } else { head };
            nesting.push(self.subtree(head, &mut visited, true));
        }
        nesting
    }

    /// The alphabetically first page of the cycle that the primary ancestor
    /// line of `page` runs into, or the top of that line if there is none.
    fn cycle_head<'a>(&'a self, page: &'a PageName) -> &'a PageName {
        let mut line: Vec<&PageName> = Vec::new();
        let mut current = page;
        loop {
            if let Some(start) = line.iter().position(|p| *p == current) {
                return line[start..].iter().min().copied().unwrap_or(current);
            }
            line.push(current);
            match self.first_parent(current) {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// The subtree rooted at `page`.
    ///
    /// With `primary_only`, a child is only followed from its primary parent,
    /// so every page lands in exactly one place.
    fn subtree<'a>(
        &'a self,
        page: &'a PageName,
        visited: &mut BTreeSet<&'a PageName>,
        primary_only: bool,
    ) -> Nesting {
        visited.insert(page);

        let mut children = Vec::new();
        for child in self.children(page) {
            if primary_only && self.first_parent(child) != Some(page) {
                continue;
            }
            if visited.contains(child) {
                continue;
            }
            children.push(self.subtree(child, visited, primary_only));
        }

        if children.is_empty() {
            Nesting::Leaf(page.clone())
        } else {
            Nesting::Branch(page.clone(), children)
        }
    }

    fn collect_descendants<'a>(
        &'a self,
        page: &'a PageName,
        visited: &mut BTreeSet<&'a PageName>,
        out: &mut Vec<&'a PageName>,
    ) {
        visited.insert(page);
        for child in self.children(page) {
            if visited.contains(child) {
                continue;
            }
            out.push(child);
            self.collect_descendants(child, visited, out);
        }
    }

    /// A page on its own: elided if it has children, a leaf otherwise.
    fn collapsed(&self, page: &PageName) -> Nesting {
        if self.children(page).is_empty() {
            Nesting::Leaf(page.clone())
        } else {
            Nesting::Branch(page.clone(), Vec::new())
        }
    }

    /// Wrap `node` (which stands for `page`) in `page`'s ancestor line.
    fn wrap_in_ancestors(&self, page: &PageName, node: Nesting) -> Nesting {
        self.ancestor_line(page)
            .into_iter()
            .rev()
            .fold(node, |inner, ancestor| {
                Nesting::Branch(ancestor.clone(), vec![inner])
            })
    }
}

/// Sort and deduplicate parent lists, dropping self-references and
/// references to pages that are not in the map.
fn normalise(mut parentmap: ParentMap) -> ParentMap {
    let known: BTreeSet<PageName> = parentmap.keys().cloned().collect();
    for (page, parents) in &mut parentmap {
        parents.retain(|parent| parent != page && known.contains(parent));
        parents.sort();
        parents.dedup();
    }
    parentmap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PageName {
        PageName::new(s).unwrap()
    }

    fn names(list: &[&str]) -> Vec<PageName> {
        list.iter().map(|s| name(s)).collect()
    }

    fn strs<'a>(list: impl IntoIterator<Item = &'a PageName>) -> Vec<&'a str> {
        list.into_iter().map(PageName::as_str).collect()
    }

    fn parentmap(entries: &[(&str, &[&str])]) -> ParentMap {
        entries
            .iter()
            .map(|(page, parents)| (name(page), names(parents)))
            .collect()
    }

    fn leaf(s: &str) -> Nesting {
        Nesting::Leaf(name(s))
    }

    fn branch(s: &str, children: Vec<Nesting>) -> Nesting {
        Nesting::Branch(name(s), children)
    }

    /// `Home` > `Projects` > (`Alpha`, `Beta`)
    fn projects() -> Outline {
        Outline::new(parentmap(&[
            ("Home", &[]),
            ("Projects", &["Home"]),
            ("Alpha", &["Projects"]),
            ("Beta", &["Projects"]),
        ]))
    }

    #[test]
    fn builds_child_map_and_nesting() {
        let outline = projects();

        assert_eq!(strs(outline.children(&name("Home"))), ["Projects"]);
        assert_eq!(strs(outline.children(&name("Projects"))), ["Alpha", "Beta"]);
        assert_eq!(outline.childmap().len(), 2);
        assert_eq!(
            outline.nesting(),
            [branch(
                "Home",
                vec![branch("Projects", vec![leaf("Alpha"), leaf("Beta")])]
            )]
        );
    }

    #[test]
    fn scenario_queries() {
        let outline = projects();
        let alpha = name("Alpha");

        assert_eq!(strs(outline.siblings(&alpha)), ["Beta"]);
        assert_eq!(outline.next(&alpha), Some(&name("Beta")));
        assert_eq!(outline.previous(&alpha), Some(&name("Projects")));
        assert_eq!(strs(outline.ancestor_line(&alpha)), ["Home", "Projects"]);
        assert_eq!(outline.first(), Some(&name("Home")));
        assert_eq!(outline.last(), Some(&name("Beta")));
    }

    #[test]
    fn update_is_idempotent() {
        let mut outline = projects();
        outline.reorder(&name("Projects"), &name("Beta"));
        let before = outline.clone();

        outline.update(before.parentmap().clone());

        assert_eq!(outline, before);
    }

    #[test]
    fn update_preserves_existing_child_order() {
        let mut outline = projects();
        outline.reorder(&name("Projects"), &name("Beta"));

        let mut map = outline.parentmap().clone();
        map.insert(name("Aardvark"), names(&["Projects"]));
        outline.update(map);

        assert_eq!(
            strs(outline.children(&name("Projects"))),
            ["Beta", "Alpha", "Aardvark"]
        );
    }

    #[test]
    fn update_drops_children_that_left() {
        let mut outline = projects();
        let mut map = outline.parentmap().clone();
        map.insert(name("Beta"), Vec::new());
        outline.update(map);

        assert_eq!(strs(outline.children(&name("Projects"))), ["Alpha"]);
        assert_eq!(
            outline.nesting(),
            [
                leaf("Beta"),
                branch("Home", vec![branch("Projects", vec![leaf("Alpha")])]),
            ]
        );
    }

    #[test]
    fn update_removes_empty_child_entries() {
        let mut outline = projects();
        let mut map = outline.parentmap().clone();
        map.insert(name("Alpha"), Vec::new());
        map.insert(name("Beta"), Vec::new());
        outline.update(map);

        assert!(!outline.childmap().contains_key(&name("Projects")));
    }

    #[test]
    fn update_cleans_parent_lists() {
        let outline = Outline::new(parentmap(&[
            ("Home", &["Home"]),
            ("Page", &["Zoo", "Apple", "Missing", "Apple", "Page"]),
            ("Zoo", &[]),
            ("Apple", &[]),
        ]));

        assert!(outline.parents(&name("Home")).is_empty());
        assert_eq!(strs(outline.parents(&name("Page"))), ["Apple", "Zoo"]);
        assert_eq!(outline.first_parent(&name("Page")), Some(&name("Apple")));
    }

    #[test]
    fn order_does_not_depend_on_insertion_order() {
        let forward = parentmap(&[("A", &[]), ("B", &["A"]), ("C", &["A"]), ("D", &["A"])]);
        let mut backward = ParentMap::new();
        for (page, parents) in forward.iter().rev() {
            backward.insert(page.clone(), parents.clone());
        }

        assert_eq!(Outline::new(forward), Outline::new(backward));
    }

    #[test]
    fn multi_parent_page_nests_under_primary_parent_only() {
        let outline = Outline::new(parentmap(&[
            ("Zoo", &[]),
            ("Apple", &[]),
            ("Page", &["Zoo", "Apple"]),
        ]));

        assert_eq!(strs(outline.children(&name("Zoo"))), ["Page"]);
        assert_eq!(strs(outline.children(&name("Apple"))), ["Page"]);
        assert_eq!(
            outline.nesting(),
            [branch("Apple", vec![leaf("Page")]), leaf("Zoo")]
        );
        assert!(outline.siblings(&name("Page")).is_empty());
    }

    #[test]
    fn nesting_contains_every_page_once() {
        let outline = Outline::new(parentmap(&[
            ("Root", &[]),
            ("A", &["Root"]),
            ("B", &["Root", "A"]),
            ("C", &["B"]),
            ("D", &["C", "A"]),
            ("Loner", &[]),
        ]));

        let mut flat = strs(nesting::flatten(outline.nesting()));
        flat.sort_unstable();
        assert_eq!(flat, ["A", "B", "C", "D", "Loner", "Root"]);
    }

    #[test]
    fn reparent_appends_to_new_parent() {
        let mut outline = projects();
        outline.reparent(&name("Beta"), &names(&["Alpha"]));

        assert_eq!(strs(outline.children(&name("Projects"))), ["Alpha"]);
        assert_eq!(strs(outline.children(&name("Alpha"))), ["Beta"]);
        assert_eq!(
            outline.nesting(),
            [branch(
                "Home",
                vec![branch(
                    "Projects",
                    vec![branch("Alpha", vec![leaf("Beta")])]
                )]
            )]
        );
    }

    #[test]
    fn reparent_does_not_resort_siblings() {
        let mut outline = Outline::new(parentmap(&[
            ("A", &[]),
            ("B", &["A"]),
            ("C", &["A"]),
            ("D", &[]),
        ]));

        outline.reparent(&name("D"), &names(&["A"]));

        assert_eq!(strs(outline.children(&name("A"))), ["B", "C", "D"]);

        outline.reparent(&name("Aa"), &names(&["A"]));
        assert_eq!(strs(outline.children(&name("A"))), ["B", "C", "D", "Aa"]);
    }

    #[test]
    fn reparent_to_nothing_makes_a_root() {
        let mut outline = projects();
        outline.reparent(&name("Projects"), &[]);

        assert!(outline.parents(&name("Projects")).is_empty());
        assert!(outline.children(&name("Home")).is_empty());
        assert_eq!(
            outline.nesting(),
            [
                leaf("Home"),
                branch("Projects", vec![leaf("Alpha"), leaf("Beta")]),
            ]
        );
    }

    #[test]
    fn reparent_ignores_self_and_unknown_parents() {
        let mut outline = projects();
        outline.reparent(&name("Beta"), &names(&["Beta", "Nowhere", "Home", "Home"]));

        assert_eq!(strs(outline.parents(&name("Beta"))), ["Home"]);
        assert_eq!(strs(outline.children(&name("Home"))), ["Projects", "Beta"]);
    }

    #[test]
    fn reparent_keeps_page_under_parents_it_still_has() {
        let mut outline = Outline::new(parentmap(&[
            ("A", &[]),
            ("B", &[]),
            ("X", &["A"]),
            ("Y", &["A"]),
        ]));

        outline.reorder(&name("A"), &name("Y"));
        outline.reparent(&name("X"), &names(&["B", "A"]));

        assert_eq!(strs(outline.children(&name("A"))), ["Y", "X"]);
        assert_eq!(strs(outline.children(&name("B"))), ["X"]);
    }

    #[test]
    fn reorder_moves_child_left() {
        let mut outline = Outline::new(parentmap(&[
            ("A", &[]),
            ("B", &["A"]),
            ("C", &["A"]),
            ("D", &["A"]),
        ]));

        assert!(outline.reorder(&name("A"), &name("D")));
        assert_eq!(strs(outline.children(&name("A"))), ["B", "D", "C"]);
        assert_eq!(
            outline.nesting(),
            [branch("A", vec![leaf("B"), leaf("D"), leaf("C")])]
        );

        assert!(!outline.reorder(&name("A"), &name("B")));
        assert_eq!(strs(outline.children(&name("A"))), ["B", "D", "C"]);
    }

    #[test]
    fn reorder_of_non_child_is_a_noop() {
        let mut outline = projects();
        let before = outline.clone();

        assert!(!outline.reorder(&name("Projects"), &name("Home")));
        assert!(!outline.reorder(&name("Nowhere"), &name("Alpha")));
        assert_eq!(outline, before);
    }

    #[test]
    fn unknown_pages_have_no_relatives() {
        let outline = projects();
        let ghost = name("Ghost");

        assert!(outline.parents(&ghost).is_empty());
        assert!(outline.children(&ghost).is_empty());
        assert!(outline.siblings(&ghost).is_empty());
        assert!(outline.ancestor_line(&ghost).is_empty());
        assert!(outline.offspring_list(&ghost).is_empty());
        assert_eq!(outline.next(&ghost), None);
        assert_eq!(outline.previous(&ghost), None);
    }

    #[test]
    fn ancestor_line_follows_primary_parent_only() {
        let outline = Outline::new(parentmap(&[
            ("Apple", &[]),
            ("Zoo", &["Keeper"]),
            ("Keeper", &[]),
            ("Page", &["Zoo", "Apple"]),
        ]));

        assert_eq!(strs(outline.ancestor_line(&name("Page"))), ["Apple"]);
    }

    #[test]
    fn ancestors_nesting_elides_page_with_children() {
        let outline = projects();

        assert_eq!(
            outline.ancestors(&name("Projects")),
            [branch("Home", vec![branch("Projects", Vec::new())])]
        );
        assert_eq!(
            outline.ancestors(&name("Alpha")),
            [branch(
                "Home",
                vec![branch("Projects", vec![leaf("Alpha")])]
            )]
        );
        assert_eq!(outline.ancestors(&name("Home")), [branch("Home", Vec::new())]);
    }

    #[test]
    fn ancestors_and_siblings_shows_parents_children() {
        let outline = projects();

        assert_eq!(
            outline.ancestors_and_siblings(&name("Alpha")),
            [branch(
                "Home",
                vec![branch("Projects", vec![leaf("Alpha"), leaf("Beta")])]
            )]
        );
    }

    #[test]
    fn ancestors_and_children_expands_page() {
        let outline = projects();

        assert_eq!(
            outline.ancestors_and_children(&name("Home")),
            [branch("Home", vec![branch("Projects", Vec::new())])]
        );
        assert_eq!(
            outline.ancestors_and_children(&name("Projects")),
            [branch(
                "Home",
                vec![branch("Projects", vec![leaf("Alpha"), leaf("Beta")])]
            )]
        );
    }

    #[test]
    fn offspring_lists_proper_descendants() {
        let outline = projects();

        assert_eq!(
            strs(outline.offspring_list(&name("Home"))),
            ["Projects", "Alpha", "Beta"]
        );
        assert!(outline.offspring_list(&name("Beta")).is_empty());
        assert_eq!(
            outline.offspring(&names(&["Projects"])),
            [branch("Projects", vec![leaf("Alpha"), leaf("Beta")])]
        );
    }

    #[test]
    fn children_nesting_is_flat() {
        let outline = projects();
        assert_eq!(outline.children_nesting(&name("Home")), [leaf("Projects")]);
    }

    #[test]
    fn cycles_are_reported_and_do_not_hang_traversal() {
        let outline = Outline::new(parentmap(&[
            ("Root", &[]),
            ("A", &["B"]),
            ("B", &["A"]),
            ("C", &["A"]),
        ]));

        assert_eq!(outline.cycles(), vec![names(&["A", "B"])]);
        assert_eq!(
            outline.nesting(),
            [leaf("Root"), branch("A", vec![leaf("B"), leaf("C")])]
        );
        assert_eq!(strs(nesting::flatten(outline.nesting())), ["Root", "A", "B", "C"]);
        assert_eq!(outline.next(&name("Root")), Some(&name("A")));
        assert_eq!(strs(outline.offspring_list(&name("A"))), ["B", "C"]);
        assert_eq!(strs(outline.ancestor_line(&name("A"))), ["B"]);
    }

    #[test]
    fn pages_below_a_cycle_nest_under_it() {
        let outline = Outline::new(parentmap(&[
            ("Apple", &["Zed"]),
            ("Yak", &["Zed"]),
            ("Zed", &["Yak"]),
        ]));

        assert_eq!(
            outline.nesting(),
            [branch("Yak", vec![branch("Zed", vec![leaf("Apple")])])]
        );
    }

    #[test]
    fn acyclic_outline_has_no_cycles() {
        assert!(projects().cycles().is_empty());
    }

    #[test]
    fn restoring_from_childmap_keeps_order_and_drops_stale_entries() {
        let original = {
            let mut outline = projects();
            outline.reorder(&name("Projects"), &name("Beta"));
            outline
        };

        let mut childmap = original.childmap().clone();
        childmap.insert(name("Ghost"), names(&["Alpha"]));

        let restored = Outline::with_childmap(original.parentmap().clone(), childmap);
        assert_eq!(restored, original);
    }
}
