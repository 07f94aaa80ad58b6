use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("pattern is valid"));

/// The name of a wiki page.
///
/// Names are free text ("Front Page", "Project Alpha") and identify a page
/// uniquely within a wiki. Surrounding whitespace is trimmed; the empty name
/// is rejected.
///
/// Names order lexicographically, which is what makes the *primary parent*
/// of a page the first entry of its sorted parent list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageName(NonEmptyString);

impl PageName {
    /// Creates a new page name.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the name is empty or only whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        let trimmed = name.trim();
        NonEmptyString::new(trimmed.to_string())
            .map(Self)
            .map_err(|_| Error::Empty)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The canonical page id derived from this name.
    ///
    /// Each word is capitalised and anything that isn't alphanumeric is
    /// dropped, so `"front page"` and `"Front-Page"` both become
    /// `"FrontPage"`. The id doubles as the page's file stem.
    #[must_use]
    pub fn canonical_id(&self) -> String {
        canonical_id(self.as_str())
    }
}

/// Convert arbitrary text into a canonical page id.
///
/// See [`PageName::canonical_id`].
#[must_use]
pub fn canonical_id(text: &str) -> String {
    NON_ALPHANUMERIC
        .split(text)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}

impl TryFrom<String> for PageName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PageName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageName> for String {
    fn from(value: PageName) -> Self {
        value.as_str().to_owned()
    }
}

impl FromStr for PageName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PageName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for PageName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for PageName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a page name is invalid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The name was empty, or contained only whitespace.
    #[error("page names must not be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Front Page", "FrontPage")]
    #[test_case("front page", "FrontPage")]
    #[test_case("Front-Page", "FrontPage")]
    #[test_case("  spaced   out  ", "SpacedOut")]
    #[test_case("Release 2.0 notes", "Release20Notes")]
    #[test_case("HomePage", "HomePage")]
    fn canonical_ids(name: &str, expected: &str) {
        let name = PageName::new(name).unwrap();
        assert_eq!(name.canonical_id(), expected);
    }

    #[test]
    fn names_are_trimmed() {
        let name = PageName::new("  Home \n").unwrap();
        assert_eq!(name.as_str(), "Home");
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "whitespace")]
    fn empty_names_are_rejected(input: &str) {
        assert_eq!(PageName::new(input), Err(Error::Empty));
    }

    #[test]
    fn names_sort_alphabetically() {
        let mut names = vec![
            PageName::new("Zoo").unwrap(),
            PageName::new("Apple").unwrap(),
            PageName::new("Mango").unwrap(),
        ];
        names.sort();
        let names: Vec<_> = names.iter().map(PageName::as_str).collect();
        assert_eq!(names, ["Apple", "Mango", "Zoo"]);
    }
}
