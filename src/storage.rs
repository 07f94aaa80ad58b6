mod cache;
pub mod directory;
/// Markdown serialization for pages.
pub mod markdown;
mod path_parser;

pub use cache::CacheError;
pub use directory::{AddPageError, Directory, DirectoryLoadError};
pub use markdown::{LoadError, MarkdownPage};
pub use path_parser::{
    METADATA_DIR, ParseError, cache_path, config_path, construct_path_from_name, parse_id_from_path,
};
