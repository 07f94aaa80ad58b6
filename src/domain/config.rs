use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a wiki.
///
/// Controls how pages are loaded and how the outline is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether to allow the wiki directory to contain markdown files that
    /// cannot be parsed as pages.
    pub allow_unrecognised: bool,

    /// Whether parent names given to a reparent may match part of a page
    /// name ("Proj" for "Projects").
    pub partial_matching: bool,

    /// Wiki-wide subtopics switch.
    ///
    /// When `false`, no page shows its subtopics, whatever the page itself
    /// says.
    pub show_subtopics: bool,

    /// Whether renderers mark the current page ("you are here").
    pub show_current: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_unrecognised: false,
            partial_matching: true,
            show_subtopics: true,
            show_current: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        allow_unrecognised: bool,

        #[serde(default = "default_true")]
        partial_matching: bool,

        #[serde(default = "default_true")]
        show_subtopics: bool,

        /// Mark the current page when rendering contents and context.
        #[serde(default = "default_true")]
        show_current: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                allow_unrecognised,
                partial_matching,
                show_subtopics,
                show_current,
            } => Self {
                allow_unrecognised,
                partial_matching,
                show_subtopics,
                show_current,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            allow_unrecognised: config.allow_unrecognised,
            partial_matching: config.partial_matching,
            show_subtopics: config.show_subtopics,
            show_current: config.show_current,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nallow_unrecognised = true\npartial_matching = false\nshow_subtopics = false\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(config.allow_unrecognised);
        assert!(!config.partial_matching);
        assert!(!config.show_subtopics);
        assert!(config.show_current);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nshow_current = \"yes\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let config = Config {
            partial_matching: false,
            ..Config::default()
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
