use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::domain::{Page, PageName};

/// A page serialized in markdown format with YAML frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPage {
    frontmatter: FrontMatter,
    body: String,
}

impl MarkdownPage {
    /// The name recorded in the frontmatter.
    #[must_use]
    pub const fn name(&self) -> &PageName {
        &self.frontmatter.name
    }

    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let frontmatter = serde_yaml::to_string(&self.frontmatter).map_err(io::Error::other)?;

        let result = if self.body.is_empty() {
            format!("---\n{frontmatter}---\n")
        } else {
            format!("---\n{frontmatter}---\n{}\n", self.body)
        };

        writer.write_all(result.as_bytes())
    }

    pub(crate) fn read<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let mut lines = reader.lines();

        let first_line = lines
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "Empty input"))??;

        if first_line.trim() != "---" {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Expected frontmatter starting with '---'",
            )
            .into());
        }

        let mut frontmatter = Vec::new();
        let mut closed = false;
        for line in lines.by_ref() {
            let line = line?;
            if line.trim() == "---" {
                closed = true;
                break;
            }
            frontmatter.push(line);
        }
        if !closed {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Expected frontmatter ending with '---'",
            )
            .into());
        }

        let body = lines.collect::<Result<Vec<_>, _>>()?.join("\n");
        let frontmatter: FrontMatter = serde_yaml::from_str(&frontmatter.join("\n"))?;

        Ok(Self { frontmatter, body })
    }

    /// Writes the page to a specific file path.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_path(&self, file_path: &Path) -> io::Result<()> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()
    }

    /// Reads a page from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(file_path: &Path) -> Result<Self, LoadError> {
        let file = File::open(file_path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let mut reader = BufReader::new(file);
        Self::read(&mut reader)
    }
}

/// Errors that can occur when loading a page from markdown.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The page file was not found.
    #[error("page file not found")]
    NotFound,
    /// An I/O error occurred.
    #[error("failed to read page: {0}")]
    Io(#[from] io::Error),
    /// The YAML frontmatter could not be parsed.
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The file name does not match the page name.
    #[error("file should be named {expected}.md")]
    Misnamed {
        /// The file stem the page name calls for.
        expected: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "FrontMatterVersion")]
#[serde(into = "FrontMatterVersion")]
struct FrontMatter {
    name: PageName,
    parents: Vec<String>,
    show_subtopics: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum FrontMatterVersion {
    #[serde(rename = "1")]
    V1 {
        name: PageName,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        parents: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        show_subtopics: Option<bool>,
    },
}

impl From<FrontMatterVersion> for FrontMatter {
    fn from(version: FrontMatterVersion) -> Self {
        match version {
            FrontMatterVersion::V1 {
                name,
                parents,
                show_subtopics,
            } => Self {
                name,
                parents,
                show_subtopics,
            },
        }
    }
}

impl From<FrontMatter> for FrontMatterVersion {
    fn from(front_matter: FrontMatter) -> Self {
        let FrontMatter {
            name,
            parents,
            show_subtopics,
        } = front_matter;
        Self::V1 {
            name,
            parents,
            show_subtopics,
        }
    }
}

impl From<Page> for MarkdownPage {
    fn from(page: Page) -> Self {
        let (name, parents, show_subtopics, body) = page.into_parts();
        Self {
            frontmatter: FrontMatter {
                name,
                parents,
                show_subtopics,
            },
            body,
        }
    }
}

impl From<MarkdownPage> for Page {
    fn from(page: MarkdownPage) -> Self {
        let MarkdownPage {
            frontmatter:
                FrontMatter {
                    name,
                    parents,
                    show_subtopics,
                },
            body,
        } = page;
        Self::from_parts(name, parents, show_subtopics, body)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;

    fn read(input: &str) -> Result<MarkdownPage, LoadError> {
        MarkdownPage::read(&mut Cursor::new(input))
    }

    #[test]
    fn markdown_round_trip() {
        let input = r"---
_version: '1'
name: Front Page
parents:
- Home
- guides
show_subtopics: false
---
# Welcome

This is a paragraph.
";

        let page = read(input).unwrap();

        assert_eq!(page.name().as_str(), "Front Page");

        let mut bytes: Vec<u8> = vec![];
        page.write(&mut bytes).unwrap();

        let actual = String::from_utf8(bytes).unwrap();
        assert_eq!(input, &actual);
    }

    #[test]
    fn minimal_page() {
        let page: Page = read("---\n_version: '1'\nname: Home\n---\n").unwrap().into();

        assert_eq!(page.name().as_str(), "Home");
        assert!(page.parents().is_empty());
        assert_eq!(page.show_subtopics(), None);
        assert_eq!(page.body(), "");
    }

    #[test]
    fn parents_are_kept_verbatim() {
        let page: Page = read("---\n_version: '1'\nname: Page\nparents:\n- Page\n- missing\n- Page\n---\n")
            .unwrap()
            .into();

        assert_eq!(page.parents(), ["Page", "missing", "Page"]);
    }

    #[test]
    fn multiline_body() {
        let page = read("---\n_version: '1'\nname: Home\n---\nLine 1\n\nLine 3\n").unwrap();

        assert_eq!(page.body, "Line 1\n\nLine 3");
    }

    #[test]
    fn invalid_frontmatter_start() {
        assert!(matches!(read("no frontmatter"), Err(LoadError::Io(_))));
    }

    #[test]
    fn missing_frontmatter_end() {
        let result = read("---\n_version: '1'\nname: Home\nthere is no closing marker");

        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            read("---\n_version: '1'\nname: '  '\n---\n"),
            Err(LoadError::Yaml(_))
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        assert!(matches!(
            read("---\n_version: '2'\nname: Home\n---\n"),
            Err(LoadError::Yaml(_))
        ));
    }

    #[test]
    fn empty_input() {
        assert!(read("").is_err());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("Home.md");
        let mut page = Page::with_parents(PageName::new("Home").unwrap(), ["Root"]);
        page.set_show_subtopics(Some(true));

        MarkdownPage::from(page.clone()).save_to_path(&path).unwrap();
        let loaded: Page = MarkdownPage::load(&path).unwrap().into();

        assert_eq!(loaded, page);
    }

    #[test]
    fn load_missing_file() {
        let tmp = TempDir::new().unwrap();

        assert!(matches!(
            MarkdownPage::load(&tmp.path().join("Nope.md")),
            Err(LoadError::NotFound)
        ));
    }
}
