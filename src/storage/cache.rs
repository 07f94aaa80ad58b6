//! The persisted outline.
//!
//! Only the parent and child maps are stored. The nesting is rebuilt when
//! the cache is read, with the stored child map supplying child order.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{ChildMap, Outline, ParentMap},
    storage::path_parser::cache_path,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum CachedOutline {
    #[serde(rename = "1")]
    V1 {
        parents: ParentMap,
        #[serde(default)]
        children: ChildMap,
    },
}

impl From<&Outline> for CachedOutline {
    fn from(outline: &Outline) -> Self {
        Self::V1 {
            parents: outline.parentmap().clone(),
            children: outline.childmap().clone(),
        }
    }
}

impl From<CachedOutline> for Outline {
    fn from(cached: CachedOutline) -> Self {
        match cached {
            CachedOutline::V1 { parents, children } => Self::with_childmap(parents, children),
        }
    }
}

/// Read the cached outline, if there is one.
///
/// # Errors
///
/// Returns an error if the cache exists but cannot be read or parsed.
pub fn load(root: &Path) -> Result<Option<Outline>, CacheError> {
    let content = match fs::read_to_string(cache_path(root)) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let cached: CachedOutline = serde_json::from_str(&content)?;
    Ok(Some(cached.into()))
}

/// Write the outline to the cache.
///
/// # Errors
///
/// Returns an error if the cache file cannot be written.
pub fn save(root: &Path, outline: &Outline) -> Result<(), CacheError> {
    let path = cache_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(&CachedOutline::from(outline))?;
    fs::write(&path, content)?;
    tracing::debug!(path = %path.display(), "saved outline cache");
    Ok(())
}

/// Remove the cache. A missing cache is not an error.
///
/// # Errors
///
/// Returns an error if the cache file exists but cannot be removed.
pub fn delete(root: &Path) -> Result<(), CacheError> {
    match fs::remove_file(cache_path(root)) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

/// Errors reading or writing the outline cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache file could not be accessed.
    #[error("failed to access outline cache: {0}")]
    Io(#[from] io::Error),
    /// The cache file is not a valid outline.
    #[error("invalid outline cache: {0}")]
    Json(#[from] serde_json::Error),
}
