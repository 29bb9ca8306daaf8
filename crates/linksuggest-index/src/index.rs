//! The two-map name index: document names and header names.

use chrono::{DateTime, Utc};
use serde::Serialize;

use linksuggest_core::{Entity, ScoredEntity};

use crate::map::NameMap;

/// Document and header name maps built from one corpus snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    documents: NameMap,
    headers: NameMap,
}

impl NameIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both maps wholesale.
    pub fn rebuild<D, H, K>(&mut self, documents: D, headers: H)
    where
        D: IntoIterator<Item = (K, Entity)>,
        H: IntoIterator<Item = (K, Entity)>,
        K: AsRef<str>,
    {
        self.documents.rebuild(documents);
        self.headers.rebuild(headers);
    }

    pub fn documents(&self) -> &NameMap {
        &self.documents
    }

    pub fn headers(&self) -> &NameMap {
        &self.headers
    }

    pub fn query_documents(&self, query: &str) -> Vec<ScoredEntity> {
        self.documents.query_approx(query)
    }

    pub fn query_headers(&self, query: &str) -> Vec<ScoredEntity> {
        self.headers.query_approx(query)
    }

    /// Documents first, then headers.
    pub fn query_all(&self, query: &str) -> Vec<ScoredEntity> {
        let mut hits = self.query_documents(query);
        hits.extend(self.query_headers(query));
        hits
    }

    pub fn clear(&mut self) {
        self.documents = NameMap::new();
        self.headers = NameMap::new();
    }
}

/// Summary of a published index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    pub headers: usize,
    pub generation: u64,
    pub built_at: DateTime<Utc>,
}
