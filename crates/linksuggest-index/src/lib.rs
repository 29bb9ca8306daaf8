//! # linksuggest-index
//!
//! Ordered name index for link suggestions.
//!
//! Maintains a derived index from a corpus of markdown documents:
//! - [`NameMap`] — ordered lowercase key → entity map with approximate lookup
//! - [`NameIndex`] — the document and header maps together
//! - [`IndexBuilder`] — wholesale rebuild from a [`CorpusSnapshot`]
//! - [`SharedIndex`] — live handle swapped atomically when a rebuild completes

pub mod builder;
pub mod index;
pub mod map;
pub mod shared;

pub use builder::{CorpusDocument, CorpusEntry, CorpusSnapshot, CorpusSource, IndexBuilder};
pub use index::{IndexStats, NameIndex};
pub use map::NameMap;
pub use shared::{RebuildTicket, SharedIndex};
