//! Per-user serialization of conversation transitions.
//!
//! Two messages from the same user must not both read `Idle` and race to
//! write a pending query, so each transition runs under the user's lock.
//! Different users never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

#[derive(Debug, Default)]
pub(crate) struct UserLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl UserLocks {
    /// Waits for exclusive access to `user_id`'s state.
    pub(crate) async fn acquire(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries only referenced by the map are idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(user_id.to_owned()).or_default())
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
