//! Request-scoped serialization of follow transitions.
//!
//! A toggle reads two accounts, decides, and writes both. Two toggles on the
//! same pair must not interleave, so each call holds a `PairGuard` from
//! before the read until after the last write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};
use crate::model::AccountId;

/// Opaque transaction identifier, used to correlate log lines of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub u64);

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}

type Slots = parking_lot::Mutex<HashMap<AccountId, Arc<Mutex<()>>>>;

/// One async mutex per account, created on demand.
#[derive(Default)]
pub struct LockTable {
    slots: Arc<Slots>,
    next_tx_id: AtomicU64,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock both accounts, always in ascending id order.
    ///
    /// Every caller agrees on that order, so two pairs sharing an account
    /// cannot deadlock. The returned guard releases both on drop, on every
    /// exit path.
    pub async fn lock_pair(&self, a: &AccountId, b: &AccountId) -> PairGuard {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };

        let first_slot = self.slot(first);
        let second_slot = (first != second).then(|| self.slot(second));

        let mut guards = Vec::with_capacity(2);
        guards.push(first_slot.lock_owned().await);
        if let Some(slot) = second_slot {
            guards.push(slot.lock_owned().await);
        }

        PairGuard {
            tx: TxId(self.next_tx_id.fetch_add(1, Ordering::Relaxed) + 1),
            guards,
            slots: Arc::clone(&self.slots),
        }
    }

    /// Number of accounts that currently have a lock slot.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: &AccountId) -> Arc<Mutex<()>> {
        Arc::clone(self.slots.lock().entry(id.clone()).or_default())
    }
}

/// Holds the lock on one account pair.
pub struct PairGuard {
    tx: TxId,
    guards: Vec<OwnedMutexGuard<()>>,
    slots: Arc<Slots>,
}

impl PairGuard {
    pub fn tx(&self) -> TxId {
        self.tx
    }
}

impl Drop for PairGuard {
    fn drop(&mut self) {
        // Release first so our references no longer count, then drop slots
        // nobody else is holding or waiting on. New references are only
        // handed out under the table lock, so the count check is stable.
        self.guards.clear();
        self.slots.lock().retain(|_, slot| Arc::strong_count(slot) > 1);
    }
}
