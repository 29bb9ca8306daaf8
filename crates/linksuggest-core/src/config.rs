//! Tunable limits for extraction and reconciliation.
//!
//! Loaded from `.linksuggest.toml` at the vault root when present:
//! ```toml
//! max_words = 8
//! max_entities = 11
//! session_capacity = 9
//! containment_cutoff = 0.9
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LinkSuggestError, Result};

/// File name looked up by [`SuggestConfig::discover`].
pub const CONFIG_FILE_NAME: &str = ".linksuggest.toml";

/// Characters that end a word.
pub const DEFAULT_DELIMITERS: &[char] = &[
    ' ', '\t', '\n', '(', ')', '[', ']', '{', '}', '<', '>', '"', ',', '.', ';', ':', '/', '\\',
    '-', '*', '!', '?',
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestConfig {
    /// Words examined backward from the cursor per extraction.
    pub max_words: usize,
    /// Entities kept per suggestion after ranking.
    pub max_entities: usize,
    /// Suggestions a session keeps before reconciling.
    pub session_capacity: usize,
    /// Fuzzy matches below this score are dropped when the matched text
    /// already contains the entity's name.
    pub containment_cutoff: f64,
    pub delimiters: Vec<char>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_words: 8,
            max_entities: 11,
            session_capacity: 9,
            containment_cutoff: 0.9,
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl SuggestConfig {
    /// Read a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LinkSuggestError::Io`] if the file cannot be read and
    /// [`LinkSuggestError::Config`] if it is not valid TOML for this struct.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| LinkSuggestError::Config(format!("{}: {e}", path.display())))
    }

    /// Load `<root>/.linksuggest.toml`, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Same as [`SuggestConfig::load`] when the file exists.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let cfg = SuggestConfig::default();
        assert_eq!(cfg.max_words, 8);
        assert_eq!(cfg.max_entities, 11);
        assert_eq!(cfg.session_capacity, 9);
        assert!(cfg.is_delimiter('?'));
        assert!(!cfg.is_delimiter('_'));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "max_words = 3\n").unwrap();

        let cfg = SuggestConfig::discover(dir.path()).unwrap();
        assert_eq!(cfg.max_words, 3);
        assert_eq!(cfg.max_entities, 11);
    }

    #[test]
    fn discover_without_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            SuggestConfig::discover(dir.path()).unwrap(),
            SuggestConfig::default()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "max_wrds = 3\n").unwrap();

        let err = SuggestConfig::load(&path).unwrap_err();
        assert!(matches!(err, LinkSuggestError::Config(_)));
    }
}
