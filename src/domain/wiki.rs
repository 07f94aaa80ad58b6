//! A collection of pages and the outline derived from them.
//!
//! The [`Wiki`] owns the one [`Outline`] of its pages. The outline is built
//! on first use, rebuilt only when asked ([`Wiki::update`]), patched in place
//! by [`Wiki::reparent`] and [`Wiki::reorder`], and can be thrown away with
//! [`Wiki::invalidate`] when the pages change behind its back.

use std::{collections::BTreeSet, fmt, io};

use nonempty::NonEmpty;
use tracing::instrument;

use crate::domain::{
    Config, Nesting, Outline, PageContext, PageName,
    nesting,
    outline::ParentMap,
    repository::{Node, Repository},
    view::{self, Projection, ViewEvent},
};

/// A collection of pages sharing one outline.
#[derive(Debug)]
pub struct Wiki<R> {
    repository: R,
    config: Config,
    outline: Option<Outline>,
}

/// Options for [`Wiki::context`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// Show the page among its siblings rather than on its own.
    pub with_siblings: bool,
    /// Show the page's direct children below it.
    ///
    /// Ignored when `with_siblings` is set.
    pub with_children: bool,
    /// A page that is being created below this one.
    ///
    /// It is appended at the bottom of the context and highlighted, without
    /// a link, instead of the page itself.
    pub pending: Option<PageName>,
}

/// The whole hierarchy, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contents {
    /// Pages with neither parents nor children.
    pub singletons: Vec<PageName>,
    /// Everything else, projected.
    pub tree: Vec<ViewEvent>,
}

impl<R> Wiki<R> {
    /// A wiki over the given pages. The outline is built on first use.
    #[must_use]
    pub const fn new(repository: R, config: Config) -> Self {
        Self {
            repository,
            config,
            outline: None,
        }
    }

    /// A wiki with a previously cached outline.
    #[must_use]
    pub const fn with_outline(repository: R, config: Config, outline: Option<Outline>) -> Self {
        Self {
            repository,
            config,
            outline,
        }
    }

    /// The underlying pages.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Mutable access to the underlying pages.
    ///
    /// Changes made through this handle are not seen by the outline. Call
    /// [`Wiki::invalidate`] or [`Wiki::update`] afterwards if they affect
    /// the hierarchy.
    pub const fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    /// The wiki configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The outline, if it has been built (or restored from a cache).
    #[must_use]
    pub const fn cached_outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    /// Discard the outline. It will be rebuilt on next use.
    pub fn invalidate(&mut self) {
        if self.outline.take().is_some() {
            tracing::debug!("outline invalidated");
        }
    }
}

impl<R: Repository> Wiki<R> {
    /// The outline, building it first if there isn't one yet.
    pub fn outline(&mut self) -> &Outline {
        self.outline_mut()
    }

    /// Queries about a single page.
    pub fn page<'a>(&'a mut self, name: &'a PageName) -> PageContext<'a> {
        PageContext::new(self.outline_mut(), name)
    }

    /// Regenerate the outline from every page's declared parents.
    ///
    /// Each page's parents are cleaned: names are resolved exactly (no
    /// partial matches), unresolvable names and the page's own name are
    /// dropped, and the rest are deduplicated and sorted. Pages whose list
    /// changed are written back. Child order from the previous outline is
    /// kept where it still applies.
    ///
    /// This touches every page. Call it sparingly.
    ///
    /// Returns the pages whose parents were cleaned.
    ///
    /// # Errors
    ///
    /// Returns an error if some cleaned pages could not be written back. The
    /// outline is updated regardless, and every page is attempted before the
    /// error is returned.
    #[instrument(skip(self))]
    pub fn update(&mut self) -> Result<Vec<PageName>, UpdateOutlineError> {
        let (parentmap, cleaned) = self.validated_parents();

        let failures: Vec<_> = cleaned
            .iter()
            .filter_map(|(page, parents)| {
                self.repository
                    .set_parents(page, parents)
                    .err()
                    .map(|e| (page.clone(), e))
            })
            .collect();

        match &mut self.outline {
            Some(outline) => outline.update(parentmap),
            None => self.outline = Some(Outline::new(parentmap)),
        }

        let cleaned: Vec<PageName> = cleaned.into_iter().map(|(page, _)| page).collect();
        NonEmpty::from_vec(failures)
            .map_or(Ok(cleaned), |failures| Err(UpdateOutlineError { failures }))
    }

    /// Move a page under the named parents.
    ///
    /// Candidate names may be fuzzy, or (if the configuration allows it)
    /// partial. Blank candidates, names that resolve to nothing, the page
    /// itself, and repeats are ignored. The survivors are stored on the page
    /// in the order given and patched into the outline. An empty result makes
    /// the page a root.
    ///
    /// Returns the parents the page ended up with.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be written back.
    #[instrument(skip(self, candidates), fields(page = %page))]
    pub fn reparent<S: AsRef<str>>(
        &mut self,
        page: &PageName,
        candidates: &[S],
    ) -> io::Result<Vec<PageName>> {
        self.outline_mut();

        let mut parents: Vec<PageName> = Vec::new();
        for candidate in candidates {
            let candidate = candidate.as_ref().trim();
            if candidate.is_empty() {
                continue;
            }
            match self
                .repository
                .resolve(candidate, self.config.partial_matching)
            {
                Some(parent) if parent == *page || parents.contains(&parent) => {}
                Some(parent) => parents.push(parent),
                None => tracing::debug!(candidate, "ignoring unknown parent"),
            }
        }

        self.repository.set_parents(page, &parents)?;
        self.outline_mut().reparent(page, &parents);

        Ok(parents)
    }

    /// Move `child` one place earlier among `parent`'s children.
    ///
    /// Returns `false` if nothing moved (the child is already first, or is
    /// not a child of `parent`).
    pub fn reorder(&mut self, parent: &PageName, child: &PageName) -> bool {
        self.outline_mut().reorder(parent, child)
    }

    /// The page's ancestors (and optionally siblings), projected with the
    /// page highlighted.
    ///
    /// If the outline has nothing to show for the page, its parents are
    /// assumed to be stale: they are cleared and the context is computed
    /// again, leaving the page as a root. A page that does not exist at all
    /// has an empty context.
    ///
    /// # Errors
    ///
    /// Returns an error if clearing the page's parents fails.
    pub fn context(
        &mut self,
        page: &PageName,
        options: &ContextOptions,
    ) -> io::Result<Vec<ViewEvent>> {
        let events = self.project_context(page, options);
        if !events.is_empty() {
            return Ok(events);
        }
        if self.repository.node(page).is_none() {
            tracing::debug!(%page, "no such page, nothing to show");
            return Ok(events);
        }

        tracing::warn!(%page, "page is missing from the outline, resetting its parents");
        self.reparent::<&str>(page, &[])?;
        Ok(self.project_context(page, options))
    }

    /// The page's direct children, projected.
    pub fn children(&mut self, page: &PageName) -> Vec<ViewEvent> {
        let nesting = self.page(page).children_nesting();
        view::project(&nesting, Projection::default())
    }

    /// Everything below the page, projected with the page highlighted.
    ///
    /// With `exclude_self` the page itself is left out and only its
    /// offspring are shown.
    pub fn offspring(&mut self, page: &PageName, exclude_self: bool) -> Vec<ViewEvent> {
        let nesting = self.page(page).offspring_nesting();
        view::project(
            &nesting,
            Projection {
                suppress_current: exclude_self,
                ..Projection::highlighting(page)
            },
        )
    }

    /// The page's subtopics: its offspring, without the page itself.
    ///
    /// Empty if subtopics are switched off for the page (see
    /// [`Wiki::subtopics_enabled`]).
    pub fn subtopics(&mut self, page: &PageName) -> Vec<ViewEvent> {
        if !self.subtopics_enabled(page) {
            return Vec::new();
        }
        self.offspring(page, true)
    }

    /// The whole hierarchy, split into singletons and projected trees.
    pub fn contents(&mut self, here: Option<&PageName>) -> Contents {
        let show_current = self.config.show_current;
        let (singletons, trees): (Vec<&Nesting>, Vec<&Nesting>) = self
            .outline_mut()
            .nesting()
            .iter()
            .partition(|element| matches!(element, Nesting::Leaf(_)));

        let singletons = singletons.into_iter().map(|s| s.head().clone()).collect();
        let trees: Vec<Nesting> = trees.into_iter().cloned().collect();
        let projection = Projection {
            highlight: here.filter(|_| show_current),
            ..Projection::default()
        };

        Contents {
            singletons,
            tree: view::project(&trees, projection),
        }
    }

    /// Whether the page should display its subtopics.
    ///
    /// The wiki-wide switch wins if it is off. Otherwise the first explicit
    /// setting found on the page or its primary ancestors applies, nearest
    /// first. With no setting anywhere, subtopics are shown.
    pub fn subtopics_enabled(&mut self, page: &PageName) -> bool {
        if !self.config.show_subtopics {
            return false;
        }
        self.outline_mut();
        let Some(outline) = self.outline.as_ref() else {
            return true;
        };

        let mut seen = BTreeSet::new();
        let mut current = page;
        while seen.insert(current) {
            if let Some(show) = self.repository.node(current).and_then(Node::show_subtopics) {
                return show;
            }
            match outline.first_parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        true
    }
}

impl<R: Repository> Wiki<R> {
    fn outline_mut(&mut self) -> &mut Outline {
        if self.outline.is_none() {
            if let Err(e) = self.update() {
                tracing::warn!("{e}");
            }
        }
        self.outline.get_or_insert_with(Outline::default)
    }

    /// Clean every page's parents against the repository.
    fn validated_parents(&self) -> (ParentMap, Vec<(PageName, Vec<PageName>)>) {
        let mut parentmap = ParentMap::new();
        let mut cleaned = Vec::new();

        for node in self.repository.nodes() {
            let name = node.name();
            let declared = node.declared_parents();

            let mut parents: Vec<PageName> = declared
                .iter()
                .filter_map(|candidate| self.repository.resolve(candidate, false))
                .filter(|parent| parent != name)
                .collect();
            parents.sort();
            parents.dedup();

            let unchanged = parents.len() == declared.len()
                && parents.iter().zip(declared).all(|(p, d)| p.as_str() == d.as_str());
            if !unchanged {
                tracing::debug!(page = %name, from = ?declared, to = ?parents, "cleaned parents");
                cleaned.push((name.clone(), parents.clone()));
            }
            parentmap.insert(name.clone(), parents);
        }

        cleaned.sort_by(|a, b| a.0.cmp(&b.0));
        (parentmap, cleaned)
    }

    fn project_context(&mut self, page: &PageName, options: &ContextOptions) -> Vec<ViewEvent> {
        let outline = self.outline_mut();
        if !outline.contains(page) {
            return Vec::new();
        }

        let context = PageContext::new(outline, page);
        let fragment = if options.with_siblings {
            context.ancestors_and_siblings_nesting()
        } else if options.with_children {
            context.ancestors_and_children_nesting()
        } else {
            context.ancestors_nesting()
        };

        match &options.pending {
            Some(pending) => view::project(
                &nesting::deep_append(fragment, pending.clone()),
                Projection {
                    suppress_link: true,
                    ..Projection::highlighting(pending)
                },
            ),
            None => view::project(&fragment, Projection::highlighting(page)),
        }
    }
}

/// Cleaned parent lists that could not be written back during an update.
#[derive(Debug, thiserror::Error)]
pub struct UpdateOutlineError {
    failures: NonEmpty<(PageName, io::Error)>,
}

impl UpdateOutlineError {
    /// The pages that failed, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = &(PageName, io::Error)> {
        self.failures.iter()
    }
}

impl fmt::Display for UpdateOutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        write!(f, "failed to save cleaned parents: ")?;

        let total = self.failures.len();

        let displayed: Vec<&str> = self
            .failures
            .iter()
            .take(MAX_DISPLAY)
            .map(|(page, _e)| page.as_str())
            .collect();

        let msg = displayed.join(", ");

        if total <= MAX_DISPLAY {
            write!(f, "{msg}")
        } else {
            write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
        }
    }
}
