//! Per-user mutual exclusion.
//!
//! Every prompt and reset for one user runs while holding that user's lock,
//! so the read-modify-write of the stored records cannot interleave.
//! Locks are keyed on [`UserId::lock_key`], so ids whose store keys overlap
//! (`x` and `x-data`) share one lock. Other users never contend. An entry is
//! pruned as soon as no request holds or waits on it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::UserId;

type Registry = HashMap<String, Arc<AsyncMutex<()>>>;

/// Registry of per-user async mutexes.
#[derive(Debug, Default)]
pub struct UserLocks {
    registry: Arc<Mutex<Registry>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until `user_id` is free and returns a guard holding it.
    pub async fn acquire(&self, user_id: &UserId) -> UserLockGuard {
        let key = user_id.lock_key().to_string();
        let lock = {
            let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(registry.entry(key.clone()).or_default())
        };

        let guard = lock.lock_owned().await;

        UserLockGuard {
            key,
            registry: Arc::clone(&self.registry),
            guard: Some(guard),
        }
    }

    /// Number of users currently holding or waiting on a lock.
    pub fn active_users(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Holds one user's lock until dropped.
#[derive(Debug)]
pub struct UserLockGuard {
    key: String,
    registry: Arc<Mutex<Registry>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        // Release first so the strong count reflects only the registry and waiters.
        drop(self.guard.take());

        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = registry.get(&self.key) {
            if Arc::strong_count(lock) == 1 {
                registry.remove(&self.key);
            }
        }
    }
}
