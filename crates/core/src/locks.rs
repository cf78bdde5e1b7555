//! In-memory mutual exclusion keyed by record id.
//!
//! Serializes operations that read a record, replace its files, and write it
//! back, so two requests for the same id cannot interleave their file
//! replacement. Scope is a single process; separate server processes
//! sharing one database and upload directory are not coordinated.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::types::DbId;

/// Lock table with one async mutex per id currently in use.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    slots: Mutex<HashMap<DbId, Arc<Mutex<()>>>>,
}

/// Held while an operation on one id is in progress.
pub struct KeyedGuard {
    id: DbId,
    _guard: OwnedMutexGuard<()>,
}

impl KeyedGuard {
    pub fn id(&self) -> DbId {
        self.id
    }
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other guard for `id` is alive, then take it.
    pub async fn lock(&self, id: DbId) -> KeyedGuard {
        let slot = {
            let mut slots = self.slots.lock().await;
            // Drop slots nobody holds or waits on any more.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(id).or_default())
        };

        KeyedGuard {
            id,
            _guard: slot.lock_owned().await,
        }
    }

    /// Number of ids with a live slot; mostly useful in tests.
    pub async fn tracked(&self) -> usize {
        self.slots.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_id_is_serialized() {
        let locks = Arc::new(KeyedLocks::new());
        let guard = locks.lock(7).await;
        assert_eq!(guard.id(), 7);

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move { locks.lock(7).await.id() })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!contender.is_finished());

        drop(guard);
        assert_eq!(contender.await.unwrap(), 7);
    }

    #[tokio::test]
    async fn different_ids_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.lock(1).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.lock(2)).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn released_slots_are_pruned() {
        let locks = KeyedLocks::new();
        drop(locks.lock(1).await);
        drop(locks.lock(2).await);
        let _held = locks.lock(3).await;
        assert_eq!(locks.tracked().await, 1);
    }
}
