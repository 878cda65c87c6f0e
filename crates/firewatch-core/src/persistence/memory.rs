//! In-memory gateway.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{parse_document, Gateway, PersistenceError, PersistenceResult, DEFAULT_DOCUMENT};
use crate::models::Roster;

/// Gateway keeping the last saved document in memory.
///
/// Clones share state, so a caller can keep a handle after handing the
/// gateway to a store and inspect what was written.
#[derive(Clone)]
pub struct MemoryGateway {
    inner: Arc<MemoryState>,
}

struct MemoryState {
    initial: Roster,
    saved: Mutex<Option<Roster>>,
    save_count: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryGateway {
    /// Gateway seeded with `initial`.
    pub fn new(initial: Roster) -> Self {
        Self {
            inner: Arc::new(MemoryState {
                initial,
                saved: Mutex::new(None),
                save_count: AtomicUsize::new(0),
                fail_writes: AtomicBool::new(false),
            }),
        }
    }

    /// Gateway seeded with the bundled default document.
    pub fn with_default_document() -> PersistenceResult<Self> {
        Ok(Self::new(parse_document(DEFAULT_DOCUMENT, "bundled default")?))
    }

    /// Last document written, if any.
    pub fn saved(&self) -> Option<Roster> {
        self.inner
            .saved
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.save_count.load(Ordering::SeqCst)
    }

    /// Make subsequent saves fail (for exercising durability gaps).
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Gateway for MemoryGateway {
    fn load(&self) -> PersistenceResult<Roster> {
        Ok(self.saved().unwrap_or_else(|| self.inner.initial.clone()))
    }

    fn save(&self, roster: &Roster) -> PersistenceResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable);
        }
        let mut saved = self
            .inner
            .saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *saved = Some(roster.clone());
        self.inner.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resident;

    #[test]
    fn test_load_returns_initial_until_saved() {
        let gateway = MemoryGateway::new(Roster::default());
        assert_eq!(gateway.load().unwrap(), Roster::default());
        assert_eq!(gateway.save_count(), 0);

        let mut roster = Roster::default();
        roster.residents.push(Resident::new("A", "B"));
        gateway.save(&roster).unwrap();

        assert_eq!(gateway.load().unwrap(), roster);
        assert_eq!(gateway.save_count(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let gateway = MemoryGateway::new(Roster::default());
        let handle = gateway.clone();
        gateway.save(&Roster::default()).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert!(handle.saved().is_some());
    }

    #[test]
    fn test_fail_writes() {
        let gateway = MemoryGateway::new(Roster::default());
        gateway.set_fail_writes(true);
        assert!(matches!(
            gateway.save(&Roster::default()),
            Err(PersistenceError::Unavailable)
        ));
        assert_eq!(gateway.save_count(), 0);
    }
}
