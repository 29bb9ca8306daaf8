//! Markdown files under a root directory, exposed as a corpus source.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use linksuggest_core::{LinkSuggestError, Result};
use linksuggest_index::{CorpusEntry, CorpusSource};

/// A directory of markdown documents.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Open an existing vault directory.
    ///
    /// # Errors
    ///
    /// Returns [`LinkSuggestError::Corpus`] if `root` is not a directory.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(LinkSuggestError::Corpus(format!(
                "vault root {} is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Vault-relative, `/`-separated form of `path`, if it lies inside the vault.
    pub fn relative_path(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    /// True for `.md` files that are not inside a hidden directory.
    pub fn is_tracked(&self, path: &Path) -> bool {
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            return false;
        }
        path.strip_prefix(&self.root).is_ok_and(|rel| {
            !rel.parent()
                .into_iter()
                .flat_map(Path::components)
                .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        })
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.')
}

impl CorpusSource for Vault {
    fn list_documents(&self) -> Result<Vec<CorpusEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden_dir(e))
        {
            let entry = entry.map_err(|e| LinkSuggestError::Corpus(e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_tracked(path) {
                continue;
            }
            let Some(rel) = self.relative_path(path) else {
                continue;
            };
            let base_name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            entries.push(CorpusEntry {
                path: rel,
                base_name,
            });
        }
        tracing::debug!(count = entries.len(), root = %self.root.display(), "listed vault documents");
        Ok(entries)
    }

    fn read_document_text(&self, path: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.root.join(path))?)
    }
}
