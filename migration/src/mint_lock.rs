use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use solana_sdk::pubkey::Pubkey;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Held for the whole migration of one mint. Dropping the last guard or
/// waiter for a mint removes its registry entry.
pub struct MintGuard<'a> {
    locks: &'a MintLocks,
    mint: Pubkey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for MintGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(self.mint);
    }
}

/// Registry of per-mint locks. Two migrations of the same mint never overlap,
/// different mints proceed independently.
#[derive(Default)]
pub struct MintLocks {
    locks: Mutex<HashMap<Pubkey, Arc<AsyncMutex<()>>>>,
}

impl MintLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, HashMap<Pubkey, Arc<AsyncMutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_for(&self, mint: Pubkey) -> Arc<AsyncMutex<()>> {
        self.registry().entry(mint).or_default().clone()
    }

    fn release(&self, mint: Pubkey) {
        let mut locks = self.registry();
        // the registry's own clone is the only one left
        if locks
            .get(&mint)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&mint);
        }
    }

    fn guard(&self, mint: Pubkey, guard: Option<OwnedMutexGuard<()>>) -> MintGuard<'_> {
        MintGuard {
            locks: self,
            mint,
            guard,
        }
    }

    /// Waits until no other migration of `mint` is running.
    pub async fn acquire(&self, mint: Pubkey) -> MintGuard<'_> {
        let guard = self.lock_for(mint).lock_owned().await;
        self.guard(mint, Some(guard))
    }

    /// Returns `None` when a migration of `mint` is already running.
    pub fn try_acquire(&self, mint: Pubkey) -> Option<MintGuard<'_>> {
        let guard = self.lock_for(mint).try_lock_owned().ok()?;
        Some(self.guard(mint, Some(guard)))
    }

    /// Number of mints with a running or waiting migration.
    pub fn active(&self) -> usize {
        self.registry().len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_mint_is_exclusive() {
        let locks = MintLocks::new();
        let mint = Pubkey::new_unique();
        let guard = locks.acquire(mint).await;
        assert!(locks.try_acquire(mint).is_none());
        drop(guard);
        assert!(locks.try_acquire(mint).is_some());
    }

    #[tokio::test]
    async fn other_mints_proceed() {
        let locks = MintLocks::new();
        let _guard = locks.acquire(Pubkey::new_unique()).await;
        assert!(locks.try_acquire(Pubkey::new_unique()).is_some());
    }

    #[tokio::test]
    async fn waiter_runs_after_release() {
        let locks = Arc::new(MintLocks::new());
        let mint = Pubkey::new_unique();
        let guard = locks.acquire(mint).await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(mint).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn released_mints_leave_the_registry() {
        let locks = MintLocks::new();
        for _ in 0..100 {
            let _guard = locks.acquire(Pubkey::new_unique()).await;
        }
        assert_eq!(locks.active(), 0);

        let mint = Pubkey::new_unique();
        let guard = locks.acquire(mint).await;
        assert!(locks.try_acquire(mint).is_none());
        assert_eq!(locks.active(), 1);
        drop(guard);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn entry_survives_while_a_waiter_holds_it() {
        let locks = Arc::new(MintLocks::new());
        let mint = Pubkey::new_unique();
        let guard = locks.acquire(mint).await;
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(mint).await;
                let _ = rx.await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(guard);
        tokio::time::sleep(Duration::from_millis(20)).await;
        // the waiter now holds the lock
        assert_eq!(locks.active(), 1);
        assert!(locks.try_acquire(mint).is_none());
        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(locks.active(), 0);
    }
}
