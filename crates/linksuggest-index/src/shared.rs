//! Live index handle with swap-on-completion rebuilds.
//!
//! Readers clone an `Arc` to the current index and never see a partial
//! build. A rebuild takes a generation ticket before building; publishing
//! succeeds only if no newer ticket was handed out meanwhile, so a
//! superseded rebuild is discarded rather than merged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};

use linksuggest_core::Result;

use crate::builder::{CorpusSource, IndexBuilder};
use crate::index::{IndexStats, NameIndex};

/// Proof that a rebuild was started; see [`SharedIndex::begin_rebuild`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RebuildTicket {
    generation: u64,
}

impl RebuildTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

struct Published {
    index: Arc<NameIndex>,
    generation: u64,
    built_at: DateTime<Utc>,
}

pub struct SharedIndex {
    live: RwLock<Published>,
    requested: AtomicU64,
    building: Mutex<()>,
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(NameIndex::new())
    }
}

impl SharedIndex {
    /// Wrap an already built index as generation 0.
    #[must_use]
    pub fn new(index: NameIndex) -> Self {
        Self {
            live: RwLock::new(Published {
                index: Arc::new(index),
                generation: 0,
                built_at: Utc::now(),
            }),
            requested: AtomicU64::new(0),
            building: Mutex::new(()),
        }
    }

    /// The last complete index.
    pub fn snapshot(&self) -> Arc<NameIndex> {
        Arc::clone(&self.live.read().index)
    }

    /// Generation of the currently published index.
    pub fn generation(&self) -> u64 {
        self.live.read().generation
    }

    pub fn stats(&self) -> IndexStats {
        let live = self.live.read();
        IndexStats {
            documents: live.index.documents().len(),
            headers: live.index.headers().len(),
            generation: live.generation,
            built_at: live.built_at,
        }
    }

    /// Start a rebuild. Any ticket issued earlier becomes stale.
    pub fn begin_rebuild(&self) -> RebuildTicket {
        RebuildTicket {
            generation: self.requested.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Install `index` if `ticket` is still the newest rebuild.
    ///
    /// Returns `false` and drops `index` when a newer rebuild has begun.
    pub fn publish(&self, ticket: RebuildTicket, index: NameIndex) -> bool {
        let mut live = self.live.write();
        if ticket.generation != self.requested.load(Ordering::SeqCst)
            || ticket.generation <= live.generation
        {
            tracing::debug!(
                generation = ticket.generation,
                "discarding superseded index rebuild"
            );
            return false;
        }
        live.index = Arc::new(index);
        live.generation = ticket.generation;
        live.built_at = Utc::now();
        true
    }

    /// Build from `source` and publish the result.
    ///
    /// Rebuilds through this method run one at a time. Returns whether the
    /// result was installed.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the corpus cannot be listed; the live
    /// index is left untouched.
    pub fn rebuild_from(&self, source: &impl CorpusSource) -> Result<bool> {
        let _guard = self.building.lock();
        let ticket = self.begin_rebuild();
        let index = IndexBuilder::build_from(source)?;
        let installed = self.publish(ticket, index);
        if installed {
            tracing::info!(generation = ticket.generation, "published name index");
        }
        Ok(installed)
    }
}
