//! Domain models for the page hierarchy.
//!
//! This module contains the page types, the cached [`Outline`] and the
//! [`Wiki`] collection that keeps it current, and the projection of
//! outline fragments into view events.

mod config;
pub use config::Config;

/// Page names and canonical ids.
pub mod name;
pub use name::{Error as PageNameError, PageName};

mod page;
pub use page::Page;

/// The seam between the outline and page storage.
pub mod repository;
pub use repository::{Node, Repository};

/// Nested page lists.
pub mod nesting;
pub use nesting::Nesting;

/// The cached hierarchy and its queries.
pub mod outline;
pub use outline::{ChildMap, Outline, ParentMap};

mod context;
pub use context::PageContext;

/// Projection of nestings into view events.
pub mod view;
pub use view::{Entry, Projection, ViewEvent};

mod wiki;
pub use wiki::{ContextOptions, Contents, UpdateOutlineError, Wiki};
