//! In-memory page storage for unit tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
};

use crate::domain::{Page, PageName, Repository, repository::resolve_name};

/// Pages held in a map, with optional simulated write failures.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    pages: BTreeMap<PageName, Page>,
    failing: BTreeSet<PageName>,
}

impl MemoryRepository {
    /// Build from `(name, declared parents)` pairs.
    pub fn from_pages(pages: &[(&str, &[&str])]) -> Self {
        let mut repository = Self::default();
        for (name, parents) in pages {
            repository.insert(name, parents);
        }
        repository
    }

    pub fn insert(&mut self, name: &str, parents: &[&str]) {
        let name = PageName::new(name).unwrap();
        let page = Page::with_parents(name.clone(), parents.iter().copied());
        self.pages.insert(name, page);
    }

    pub fn parents_of(&self, name: &str) -> Vec<&str> {
        self.pages[name].parents().iter().map(String::as_str).collect()
    }

    pub fn set_show_subtopics(&mut self, name: &str, value: Option<bool>) {
        self.pages
            .get_mut(name)
            .unwrap()
            .set_show_subtopics(value);
    }

    /// Make every later write to this page fail.
    pub fn fail_writes_to(&mut self, name: &str) {
        self.failing.insert(PageName::new(name).unwrap());
    }
}

impl Repository for MemoryRepository {
    type Node = Page;

    fn nodes(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    fn node(&self, name: &PageName) -> Option<&Page> {
        self.pages.get(name)
    }

    fn resolve(&self, candidate: &str, allow_partial: bool) -> Option<PageName> {
        resolve_name(self.pages.keys(), candidate, allow_partial)
    }

    fn set_parents(&mut self, name: &PageName, parents: &[PageName]) -> io::Result<()> {
        if self.failing.contains(name) {
            return Err(io::Error::other("simulated write failure"));
        }
        let page = self
            .pages
            .get_mut(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))?;
        page.set_parents(parents.iter().map(PageName::as_str));
        Ok(())
    }
}
