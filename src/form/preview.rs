use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::form::photo::SourceFile;

#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    live: HashSet<u64>,
    minted: u64,
    released: u64,
    double_releases: u64,
}

/// Mints preview handles and keeps account of which ones are still alive.
///
/// Cloning the registry shares the same ledger, so a handle can release
/// itself no matter which clone minted it.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    ledger: Arc<Mutex<Ledger>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, source: &SourceFile) -> PreviewHandle {
        let mut ledger = self.lock();
        ledger.next_id = ledger.next_id.saturating_add(1);
        let id = ledger.next_id;
        ledger.live.insert(id);
        ledger.minted = ledger.minted.saturating_add(1);
        PreviewHandle {
            id,
            url: format!("preview://{id}/{}", source.file_name()),
            registry: self.clone(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.lock().live.contains(&id)
    }

    pub fn minted(&self) -> u64 {
        self.lock().minted
    }

    pub fn released(&self) -> u64 {
        self.lock().released
    }

    pub fn double_releases(&self) -> u64 {
        self.lock().double_releases
    }

    fn release(&self, id: u64) {
        let mut ledger = self.lock();
        if ledger.live.remove(&id) {
            ledger.released = ledger.released.saturating_add(1);
        } else {
            ledger.double_releases = ledger.double_releases.saturating_add(1);
            warn!(id, "preview handle released twice");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owning handle to a photo preview. Released when dropped.
#[derive(Debug)]
pub struct PreviewHandle {
    id: u64,
    url: String,
    registry: PreviewRegistry,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::PreviewRegistry;
    use crate::form::photo::SourceFile;

    #[test]
    fn dropping_a_handle_releases_it_once() {
        let registry = PreviewRegistry::new();
        let handle = registry.mint(&SourceFile::new("/tmp/a.jpg"));
        let id = handle.id();
        assert!(registry.is_live(id));
        assert!(handle.url().ends_with("/a.jpg"));

        drop(handle);

        assert!(!registry.is_live(id));
        assert_eq!(registry.minted(), 1);
        assert_eq!(registry.released(), 1);
        assert_eq!(registry.double_releases(), 0);
    }

    #[test]
    fn clones_share_one_ledger() {
        let registry = PreviewRegistry::new();
        let clone = registry.clone();
        let first = registry.mint(&SourceFile::new("a.png"));
        let second = clone.mint(&SourceFile::new("b.png"));
        assert_ne!(first.id(), second.id());
        assert_eq!(registry.live_count(), 2);
        drop(first);
        assert_eq!(clone.live_count(), 1);
    }
}
