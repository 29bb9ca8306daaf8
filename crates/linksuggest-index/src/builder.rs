//! Rebuilds a [`NameIndex`] from a corpus snapshot.
//!
//! Every document contributes one entity keyed by its base name. Every
//! ATX heading (`#` to `######`, one space, text) contributes one entity
//! keyed by the heading text and identified as `path#heading`.

use std::sync::LazyLock;

use regex::Regex;

use linksuggest_core::{Entity, Result};

use crate::index::NameIndex;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6} (.*)$").expect("valid heading regex"));

/// A document as listed by a corpus source, before its text is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Path relative to the corpus root, `/`-separated, with extension.
    pub path: String,
    /// File name without extension.
    pub base_name: String,
}

/// Read access to the documents an index is built from.
pub trait CorpusSource {
    /// # Errors
    ///
    /// Returns an error if the corpus cannot be enumerated.
    fn list_documents(&self) -> Result<Vec<CorpusEntry>>;

    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    fn read_document_text(&self, path: &str) -> Result<String>;
}

/// One document with its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDocument {
    pub path: String,
    pub display_name: String,
    pub text: String,
}

/// Every document of a corpus, read at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusSnapshot {
    pub documents: Vec<CorpusDocument>,
}

impl CorpusSnapshot {
    /// Read every listed document from `source`.
    ///
    /// Documents whose text cannot be read are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the listing itself fails.
    pub fn collect(source: &impl CorpusSource) -> Result<Self> {
        let entries = source.list_documents()?;
        let mut documents = Vec::with_capacity(entries.len());
        for entry in entries {
            match source.read_document_text(&entry.path) {
                Ok(text) => documents.push(CorpusDocument {
                    path: entry.path,
                    display_name: entry.base_name,
                    text,
                }),
                Err(e) => tracing::warn!(path = %entry.path, error = %e, "skipping unreadable document"),
            }
        }
        Ok(Self { documents })
    }
}

/// Lowercase path with a trailing `.md` removed.
#[must_use]
pub fn document_identifier(path: &str) -> String {
    path.strip_suffix(".md").unwrap_or(path).to_lowercase()
}

/// Lowercase `path#heading`, keeping the path's extension.
#[must_use]
pub fn header_identifier(path: &str, heading: &str) -> String {
    format!("{path}#{heading}").to_lowercase()
}

/// Trimmed, non-blank heading texts of `text`, in document order.
#[must_use]
pub fn extract_headings(text: &str) -> Vec<&str> {
    HEADING
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|heading| !heading.is_empty())
        .collect()
}

pub struct IndexBuilder;

impl IndexBuilder {
    /// Build a fresh index from `snapshot`.
    #[must_use]
    pub fn build(snapshot: &CorpusSnapshot) -> NameIndex {
        let mut documents = Vec::with_capacity(snapshot.documents.len());
        let mut headers = Vec::new();

        for doc in &snapshot.documents {
            documents.push((
                doc.display_name.to_lowercase(),
                Entity::document(document_identifier(&doc.path), doc.display_name.clone()),
            ));
            for heading in extract_headings(&doc.text) {
                headers.push((
                    heading.to_lowercase(),
                    Entity::header(header_identifier(&doc.path, heading), heading),
                ));
            }
        }

        let mut index = NameIndex::new();
        index.rebuild(documents, headers);
        tracing::info!(
            documents = index.documents().len(),
            headers = index.headers().len(),
            "built name index"
        );
        index
    }

    /// Read `source` and build an index from it.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the corpus cannot be listed.
    pub fn build_from(source: &impl CorpusSource) -> Result<NameIndex> {
        let snapshot = CorpusSnapshot::collect(source)?;
        Ok(Self::build(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use linksuggest_core::LinkSuggestError;

    struct MemoryCorpus {
        files: HashMap<String, Option<String>>,
    }

    impl MemoryCorpus {
        fn new(files: &[(&str, Option<&str>)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, t)| ((*p).to_string(), t.map(str::to_string)))
                    .collect(),
            }
        }
    }

    impl CorpusSource for MemoryCorpus {
        fn list_documents(&self) -> Result<Vec<CorpusEntry>> {
            let mut entries: Vec<_> = self
                .files
                .keys()
                .map(|path| CorpusEntry {
                    path: path.clone(),
                    base_name: path
                        .rsplit('/')
                        .next()
                        .unwrap_or(path)
                        .trim_end_matches(".md")
                        .to_string(),
                })
                .collect();
            entries.sort_by(|a, b| a.path.cmp(&b.path));
            Ok(entries)
        }

        fn read_document_text(&self, path: &str) -> Result<String> {
            self.files
                .get(path)
                .cloned()
                .flatten()
                .ok_or_else(|| LinkSuggestError::Corpus(format!("cannot read {path}")))
        }
    }

    fn snapshot(docs: &[(&str, &str, &str)]) -> CorpusSnapshot {
        CorpusSnapshot {
            documents: docs
                .iter()
                .map(|(path, name, text)| CorpusDocument {
                    path: (*path).to_string(),
                    display_name: (*name).to_string(),
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn extract_headings_follows_atx_syntax() {
        let text = "# Title\n\
                    ## Key Risks  \r\n\
                    ###### Deep\n\
                    ####### Too deep\n\
                    #NoSpace\n\
                    ##   \n\
                    text with # inside\n";
        assert_eq!(extract_headings(text), vec!["Title", "Key Risks", "Deep"]);
    }

    #[test]
    fn identifiers_are_normalized() {
        assert_eq!(document_identifier("Work/Project Plan.md"), "work/project plan");
        assert_eq!(header_identifier("risks.md", "Key Risks"), "risks.md#key risks");
    }

    #[test]
    fn build_indexes_documents_and_headers() {
        let index = IndexBuilder::build(&snapshot(&[
            ("risks.md", "risks", "# Overview\n## Key Risks\nbody\n"),
            ("work/Project Plan.md", "Project Plan", "no headings"),
        ]));

        let plan = index.documents().get("project plan").unwrap();
        assert_eq!(plan.identifier, "work/project plan");
        assert_eq!(plan.display_name, "Project Plan");

        let risks = index.headers().get("key risks").unwrap();
        assert_eq!(risks.identifier, "risks.md#key risks");
        assert_eq!(risks.display_name, "Key Risks");
        assert_eq!(index.headers().len(), 2);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let snap = snapshot(&[
            ("a.md", "a", "# One\n# Two\n"),
            ("b.md", "B", "## Three\n"),
        ]);
        let first = IndexBuilder::build(&snap);
        let second = IndexBuilder::build(&snap);

        assert!(first.documents().keys().eq(second.documents().keys()));
        assert!(first.headers().keys().eq(second.headers().keys()));
        let names = |i: &NameIndex| {
            i.documents()
                .iter()
                .chain(i.headers().iter())
                .map(|(_, e)| e.display_name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn build_from_skips_unreadable_documents() {
        let corpus = MemoryCorpus::new(&[("ok.md", Some("# Fine\n")), ("broken.md", None)]);
        let index = IndexBuilder::build_from(&corpus).unwrap();

        assert_eq!(index.documents().len(), 1);
        assert!(index.documents().get("ok").is_some());
        assert!(index.headers().get("fine").is_some());
    }
}
