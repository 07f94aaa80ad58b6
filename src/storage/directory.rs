//! A filesystem backed store of pages
//!
//! The [`Directory`] loads every page in a wiki root and implements the
//! [`Repository`] boundary for the filesystem agnostic [`Wiki`].

use std::{
    collections::{BTreeMap, btree_map::Entry},
    ffi::OsStr,
    fmt, io,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use crate::{
    domain::{Config, Page, PageName, Repository, Wiki, repository::resolve_name},
    storage::{
        cache::{self, CacheError},
        markdown::{LoadError, MarkdownPage},
        path_parser::{
            METADATA_DIR, ParseError, config_path, construct_path_from_name, parse_id_from_path,
        },
    },
};

/// A directory whose pages have been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pages: BTreeMap<PageName, Page>,
    /// Where each page was read from.
    paths: BTreeMap<PageName, PathBuf>,
    config: Config,
}

/// A directory that has not been read yet.
#[derive(Debug, PartialEq, Eq)]
pub struct Unloaded;

/// A filesystem backed store of pages.
#[derive(Debug)]
pub struct Directory<S = Loaded> {
    /// The root of the directory pages are stored in.
    root: PathBuf,
    state: S,
}

impl<S> Directory<S> {
    /// The wiki root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Directory<Unloaded> {
    /// Opens a directory at the given path.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self {
            root,
            state: Unloaded,
        }
    }

    /// Load all pages from disk
    ///
    /// Pages may be stored in subdirectories of the root. Each page is
    /// written back to the file it was read from.
    ///
    /// # Errors
    ///
    /// This method has different behaviour depending on the configuration file
    /// in the wiki root. If `allow_unrecognised` is `true`, then any markdown
    /// files that cannot be parsed as pages are skipped. If
    /// `allow_unrecognised` is `false` (the default), then any unrecognised or
    /// invalid markdown files in the directory will return an error.
    ///
    /// Two files holding the same page are always an error.
    pub fn load_all(self) -> Result<Directory<Loaded>, DirectoryLoadError> {
        let config = load_config(&self.root);
        let md_paths = collect_markdown_paths(&self.root);

        let (pages, unrecognised_paths): (Vec<_>, Vec<_>) = md_paths
            .par_iter()
            .map(|path| try_load_page(path))
            .partition_map(|result| match result {
                Ok(page) => rayon::iter::Either::Left(page),
                Err(path) => rayon::iter::Either::Right(path),
            });

        if !config.allow_unrecognised && !unrecognised_paths.is_empty() {
            return Err(DirectoryLoadError::UnrecognisedFiles(unrecognised_paths));
        }

        let mut paths: BTreeMap<PageName, PathBuf> = BTreeMap::new();
        let mut duplicates: BTreeMap<PageName, Vec<PathBuf>> = BTreeMap::new();
        let mut loaded: BTreeMap<PageName, Page> = BTreeMap::new();
        for (path, page) in pages {
            match paths.entry(page.name().clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(path);
                    loaded.insert(page.name().clone(), page);
                }
                Entry::Occupied(entry) => duplicates
                    .entry(entry.key().clone())
                    .or_insert_with(|| vec![entry.get().clone()])
                    .push(path),
            }
        }

        if !duplicates.is_empty() {
            for paths in duplicates.values_mut() {
                paths.sort();
            }
            return Err(DirectoryLoadError::DuplicatePages(duplicates));
        }

        tracing::debug!(pages = loaded.len(), root = %self.root.display(), "loaded wiki");

        Ok(Directory {
            root: self.root,
            state: Loaded {
                pages: loaded,
                paths,
                config,
            },
        })
    }
}

impl Directory<Loaded> {
    /// Open and load the wiki at the given path.
    ///
    /// # Errors
    ///
    /// See [`Directory::load_all`].
    pub fn open(root: PathBuf) -> Result<Self, DirectoryLoadError> {
        Directory::new(root).load_all()
    }

    /// The configuration the wiki was loaded with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.state.config
    }

    /// All pages, by name.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.state.pages.values()
    }

    /// A single page, by exact name.
    #[must_use]
    pub fn page(&self, name: &PageName) -> Option<&Page> {
        self.state.pages.get(name)
    }

    /// The file a page is stored in.
    ///
    /// This is the file the page was loaded from, or for a page not yet on
    /// disk, `<root>/<id>.md`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page is new and no file name can be derived
    /// from its name.
    pub fn path_for(&self, name: &PageName) -> Result<PathBuf, ParseError> {
        match self.state.paths.get(name) {
            Some(path) => Ok(path.clone()),
            None => construct_path_from_name(&self.root, name),
        }
    }

    /// Add a new page, with no parents, to the directory.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - no file name can be derived from the page name
    /// - a page with the same id already exists
    /// - the page file cannot be written to
    pub fn add_page(&mut self, name: PageName, body: String) -> Result<Page, AddPageError> {
        let path = self.path_for(&name)?;
        let id = name.canonical_id();
        if let Some(existing) = self.state.pages.keys().find(|p| p.canonical_id() == id) {
            return Err(AddPageError::Exists(existing.clone()));
        }
        if path.exists() {
            return Err(AddPageError::Exists(name));
        }

        let page = Page::new(name, body);
        MarkdownPage::from(page.clone()).save_to_path(&path)?;
        self.state.pages.insert(page.name().clone(), page.clone());
        self.state.paths.insert(page.name().clone(), path);

        tracing::info!("Added page: {}", page.name());

        Ok(page)
    }

    /// Wrap the directory in a [`Wiki`], restoring the cached outline if
    /// there is a usable one.
    ///
    /// A cache that cannot be read, or that covers a different set of pages
    /// than the directory holds, is ignored. The outline is then rebuilt on
    /// first use.
    #[must_use]
    pub fn into_wiki(self) -> Wiki<Self> {
        let outline = match cache::load(&self.root) {
            Ok(Some(outline)) if outline.parentmap().keys().eq(self.state.pages.keys()) => {
                Some(outline)
            }
            Ok(Some(_)) => {
                tracing::debug!("outline cache is out of date, ignoring it");
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("Failed to load outline cache: {e}");
                None
            }
        };
        let config = self.state.config.clone();
        Wiki::with_outline(self, config, outline)
    }
}

impl Repository for Directory<Loaded> {
    type Node = Page;

    fn nodes(&self) -> impl Iterator<Item = &Page> {
        self.pages()
    }

    fn node(&self, name: &PageName) -> Option<&Page> {
        self.page(name)
    }

    fn resolve(&self, candidate: &str, allow_partial: bool) -> Option<PageName> {
        resolve_name(self.state.pages.keys(), candidate, allow_partial)
    }

    fn set_parents(&mut self, name: &PageName, parents: &[PageName]) -> io::Result<()> {
        let path = self.path_for(name).map_err(io::Error::other)?;
        let page = self
            .state
            .pages
            .get_mut(name)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no page named '{name}'"))
            })?;

        page.set_parents(parents.iter().map(PageName::as_str));
        MarkdownPage::from(page.clone()).save_to_path(&path)
    }
}

impl Wiki<Directory> {
    /// Create a page and place it under the named parents.
    ///
    /// Parent names are resolved as in [`Wiki::reparent`].
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be created or written.
    pub fn create_page<S: AsRef<str>>(
        &mut self,
        name: PageName,
        parents: &[S],
        body: String,
    ) -> Result<Page, AddPageError> {
        self.repository_mut().add_page(name.clone(), body)?;
        self.reparent(&name, parents)?;
        self.repository()
            .page(&name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()).into())
    }

    /// Write the outline to the cache, if it has been built.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be written.
    pub fn flush(&self) -> Result<(), CacheError> {
        match self.cached_outline() {
            Some(outline) => cache::save(self.repository().root(), outline),
            None => Ok(()),
        }
    }

    /// Discard the outline, in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache file cannot be removed.
    pub fn discard_outline(&mut self) -> Result<(), CacheError> {
        self.invalidate();
        cache::delete(self.repository().root())
    }
}

fn load_config(root: &Path) -> Config {
    let path = config_path(root);
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

fn collect_markdown_paths(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != OsStr::new(METADATA_DIR))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("md")))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn try_load_page(path: &Path) -> Result<(PathBuf, Page), PathBuf> {
    match load_page_from_file(path) {
        Ok(page) => Ok((path.to_path_buf(), page)),
        Err(e) => {
            tracing::debug!("Skipping unrecognised file at {}: {e}", path.display());
            Err(path.to_path_buf())
        }
    }
}

fn load_page_from_file(path: &Path) -> Result<Page, LoadError> {
    let md_page = MarkdownPage::load(path)?;

    let expected = md_page.name().canonical_id();
    if parse_id_from_path(path).ok() != Some(expected.as_str()) {
        return Err(LoadError::Misnamed { expected });
    }

    Ok(Page::from(md_page))
}

/// Errors that can occur when loading a directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryLoadError {
    /// Markdown files that are not valid pages.
    UnrecognisedFiles(Vec<PathBuf>),
    /// Pages stored in more than one file, with every file holding them.
    DuplicatePages(BTreeMap<PageName, Vec<PathBuf>>),
}

impl fmt::Display for DirectoryLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognisedFiles(paths) => {
                write!(f, "Unrecognised files: ")?;
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", path.display())?;
                }
                Ok(())
            }
            Self::DuplicatePages(pages) => {
                write!(f, "Pages stored more than once: ")?;
                for (i, (page, paths)) in pages.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{page} (")?;
                    for (j, path) in paths.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", path.display())?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

/// Errors that can occur when adding a page.
#[derive(Debug, thiserror::Error)]
pub enum AddPageError {
    /// No file name can be derived from the page name.
    #[error("failed to add page: {0}")]
    Name(#[from] ParseError),
    /// A page with the same id already exists.
    #[error("failed to add page: '{0}' already exists")]
    Exists(PageName),
    /// The page file could not be written.
    #[error("failed to add page: {0}")]
    Io(#[from] io::Error),
}
