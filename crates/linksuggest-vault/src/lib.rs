//! # linksuggest-vault
//!
//! File system access for linksuggest.
//!
//! The vault directory is the source of truth for link targets. The name
//! index is a derived view that is rebuilt from vault files whenever the
//! watcher reports a change.

pub mod vault;
pub mod watcher;

pub use vault::Vault;
pub use watcher::{VaultEvent, VaultWatcher};
