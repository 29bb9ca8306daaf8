//! Ordered key → entity map with approximate lookup.

use std::collections::BTreeMap;

use linksuggest_core::similarity;
use linksuggest_core::{Entity, ScoredEntity};

/// Lowercase name keys mapped to entities, ordered by key.
///
/// One entity per key: inserting an existing key replaces the previous
/// entity (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    entries: BTreeMap<String, Entity>,
}

impl NameMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the lowercased `key`, returning the entity it replaced.
    pub fn insert(&mut self, key: &str, entity: Entity) -> Option<Entity> {
        let key = key.to_lowercase();
        let replaced = self.entries.insert(key.clone(), entity);
        if let Some(old) = &replaced {
            tracing::debug!(key = %key, replaced = %old.identifier, "name key collision");
        }
        replaced
    }

    /// Clear and repopulate from `entries`.
    pub fn rebuild<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Entity)>,
        K: AsRef<str>,
    {
        self.entries.clear();
        for (key, entity) in entries {
            self.insert(key.as_ref(), entity);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entries.get(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// New map holding the entries that satisfy `keep`, in key order.
    #[must_use]
    pub fn filter<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str, &Entity) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .filter(|(k, v)| keep(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { entries }
    }

    /// Every entity whose key accepts `query` (see
    /// [`similarity::accept`]), as owned copies scored against the query,
    /// in key order. An empty query matches nothing.
    #[must_use]
    pub fn query_approx(&self, query: &str) -> Vec<ScoredEntity> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter_map(|(key, entity)| {
                similarity::accept(key, &query).map(|score| ScoredEntity::new(entity.clone(), score))
            })
            .collect()
    }
}
