//! File system watcher that signals when the name index is out of date.
//!
//! Uses the `notify` crate for cross-platform file system events
//! (FSEvents on macOS, inotify on Linux, ReadDirectoryChanges on Windows).

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use linksuggest_core::{LinkSuggestError, Result};

use crate::vault::Vault;

/// Events emitted by the vault watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    /// A markdown file was created or modified.
    Changed(PathBuf),
    /// A markdown file was deleted.
    Removed(PathBuf),
}

/// Watches a vault directory for markdown changes.
pub struct VaultWatcher {
    _watcher: RecommendedWatcher,
    receiver: mpsc::Receiver<VaultEvent>,
}

impl VaultWatcher {
    /// Start watching `vault` recursively.
    ///
    /// # Errors
    ///
    /// Returns [`LinkSuggestError::Watch`] if the watcher cannot be created.
    pub fn start(vault: &Vault) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let filter = vault.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "vault watch error");
                    return;
                }
            };
            for path in &event.paths {
                if !filter.is_tracked(path) {
                    continue;
                }
                let vault_event = match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) => VaultEvent::Changed(path.clone()),
                    EventKind::Remove(_) => VaultEvent::Removed(path.clone()),
                    _ => continue,
                };
                let _ = tx.send(vault_event);
            }
        })
        .map_err(|e| LinkSuggestError::Watch(e.to_string()))?;

        watcher
            .watch(vault.root(), RecursiveMode::Recursive)
            .map_err(|e| LinkSuggestError::Watch(e.to_string()))?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<VaultEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Receive the next event without blocking.
    pub fn try_recv(&self) -> Option<VaultEvent> {
        self.receiver.try_recv().ok()
    }

    /// Wait for one event, then collect whatever else arrives within
    /// `settle`. Editors save in bursts; one rebuild covers the batch.
    pub fn next_batch(&self, timeout: Duration, settle: Duration) -> Vec<VaultEvent> {
        let Some(first) = self.recv_timeout(timeout) else {
            return Vec::new();
        };
        let mut batch = vec![first];
        while let Some(next) = self.recv_timeout(settle) {
            batch.push(next);
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn watched_vault() -> (tempfile::TempDir, Vault) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".trash")).unwrap();
        fs::create_dir_all(dir.path().join("projects")).unwrap();
        let vault = Vault::open(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn watcher_detects_new_file() {
        let (dir, vault) = watched_vault();
        let watcher = VaultWatcher::start(&vault).unwrap();

        let file = dir.path().join("projects").join("plan.md");
        fs::write(&file, "# Plan\n").unwrap();

        let event = watcher.recv_timeout(Duration::from_secs(2));
        match event {
            Some(VaultEvent::Changed(path)) => {
                assert!(path.to_string_lossy().contains("plan.md"));
            }
            other => panic!("Expected Changed event, got {other:?}"),
        }
    }

    #[test]
    fn watcher_detects_deletion() {
        let (dir, vault) = watched_vault();
        let file = dir.path().join("projects").join("to-delete.md");
        fs::write(&file, "# Delete Me").unwrap();

        let watcher = VaultWatcher::start(&vault).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        fs::remove_file(&file).unwrap();

        // FSEvents may report a change before the removal.
        let mut found_removed = false;
        for _ in 0..10 {
            match watcher.recv_timeout(Duration::from_secs(2)) {
                Some(VaultEvent::Removed(path)) => {
                    assert!(path.to_string_lossy().contains("to-delete.md"));
                    found_removed = true;
                    break;
                }
                Some(VaultEvent::Changed(_)) => continue,
                None => break,
            }
        }
        assert!(found_removed, "Expected watcher to emit Removed event");
    }

    #[test]
    fn watcher_ignores_untracked_files() {
        let (dir, vault) = watched_vault();
        let watcher = VaultWatcher::start(&vault).unwrap();

        fs::write(dir.path().join("projects").join("notes.txt"), "plain").unwrap();
        fs::write(dir.path().join(".trash").join("old.md"), "# Old").unwrap();

        let event = watcher.recv_timeout(Duration::from_millis(500));
        assert!(event.is_none(), "Watcher should ignore untracked files");
    }

    #[test]
    fn next_batch_collects_burst() {
        let (dir, vault) = watched_vault();
        let watcher = VaultWatcher::start(&vault).unwrap();

        fs::write(dir.path().join("a.md"), "# A").unwrap();
        fs::write(dir.path().join("b.md"), "# B").unwrap();

        let batch = watcher.next_batch(Duration::from_secs(2), Duration::from_millis(300));
        assert!(!batch.is_empty());
        assert!(watcher.try_recv().is_none());
    }
}
