//! Error types for linksuggest.

use thiserror::Error;

/// Top-level result type for linksuggest operations.
pub type Result<T> = std::result::Result<T, LinkSuggestError>;

/// Top-level error type for linksuggest.
///
/// Only the I/O edges (corpus reads, config files, watchers) produce
/// errors. Matching, extraction and reconciliation never fail: an empty
/// result is the worst outcome.
#[derive(Debug, Error)]
pub enum LinkSuggestError {
    #[error("corpus error: {0}")]
    Corpus(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("watch error: {0}")]
    Watch(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
