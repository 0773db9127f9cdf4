//! In-memory store.
//!
//! This is the reference implementation of `AccountStore` and
//! `NotificationStore`. One `MemoryStore` (cheaply cloned, shared state)
//! serves as both collaborators.
//!
//! ## Guarantees
//!
//! - **Atomic dual write**: `update_follow_edges()` mutates both account
//!   records under a single write lock, so readers never observe a
//!   half-edge.
//! - **No persistence**: everything is lost on drop.
//! - **Sampling is a full scan**: fine for tests and small embeddings.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::collections::HashMap;
use async_trait::async_trait;
use hashbrown::HashSet;
use parking_lot::RwLock;

use crate::model::*;
use crate::{Error, Result};
use super::{AccountStore, NotificationStore};

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory account and notification storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    accounts: RwLock<HashMap<AccountId, Account>>,
    /// username → account id
    usernames: RwLock<HashMap<String, AccountId>>,
    /// Append-only, oldest first.
    notifications: RwLock<Vec<Notification>>,
    next_notification_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account. Registration proper is someone else's job; this only
    /// makes the record visible. Any edges on the input are dropped, since
    /// edges are created by follow transitions only.
    pub fn register(&self, mut account: Account) -> Result<AccountId> {
        let mut accounts = self.inner.accounts.write();
        let mut usernames = self.inner.usernames.write();

        if accounts.contains_key(&account.id) {
            return Err(Error::InvalidOperation(format!("Account {} already exists", account.id)));
        }
        if usernames.contains_key(&account.username) {
            return Err(Error::InvalidOperation(format!("Username {} is taken", account.username)));
        }

        account.followers.clear();
        account.following.clear();
        let id = account.id.clone();
        usernames.insert(account.username.clone(), id.clone());
        accounts.insert(id.clone(), account);
        Ok(id)
    }

    pub fn account_count(&self) -> usize {
        self.inner.accounts.read().len()
    }

    pub fn notification_count(&self) -> usize {
        self.inner.notifications.read().len()
    }
}

fn missing(id: &AccountId) -> Error {
    Error::NotFound(format!("Account {id}"))
}

// ============================================================================
// AccountStore impl
// ============================================================================

#[async_trait]
impl AccountStore for MemoryStore {
    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>> {
        Ok(self.inner.accounts.read().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let Some(id) = self.inner.usernames.read().get(username).cloned() else {
            return Ok(None);
        };
        Ok(self.inner.accounts.read().get(&id).cloned())
    }

    async fn sample_accounts(&self, exclude: &[AccountId], size: usize) -> Result<Vec<Account>> {
        let excluded: HashSet<&AccountId> = exclude.iter().collect();
        let accounts = self.inner.accounts.read();
        let candidates: Vec<&Account> = accounts
            .values()
            .filter(|a| !excluded.contains(&a.id))
            .collect();

        let amount = size.min(candidates.len());
        let mut rng = rand::rng();
        Ok(rand::seq::index::sample(&mut rng, candidates.len(), amount)
            .into_iter()
            .map(|i| candidates[i].clone())
            .collect())
    }

    async fn set_follower_edge(
        &self,
        target: &AccountId,
        follower: &AccountId,
        present: bool,
    ) -> Result<()> {
        if target == follower {
            return Err(Error::InvalidOperation(format!("Account {target} cannot follow itself")));
        }
        let mut accounts = self.inner.accounts.write();
        let account = accounts.get_mut(target).ok_or_else(|| missing(target))?;
        if present {
            account.followers.insert(follower.clone());
        } else {
            account.followers.remove(follower);
        }
        Ok(())
    }

    async fn set_following_edge(
        &self,
        actor: &AccountId,
        target: &AccountId,
        present: bool,
    ) -> Result<()> {
        if actor == target {
            return Err(Error::InvalidOperation(format!("Account {actor} cannot follow itself")));
        }
        let mut accounts = self.inner.accounts.write();
        let account = accounts.get_mut(actor).ok_or_else(|| missing(actor))?;
        if present {
            account.following.insert(target.clone());
        } else {
            account.following.remove(target);
        }
        Ok(())
    }

    /// Both sides under one write lock: either both records change or neither.
    async fn update_follow_edges(
        &self,
        actor: &AccountId,
        target: &AccountId,
        direction: FollowDirection,
    ) -> Result<()> {
        if actor == target {
            return Err(Error::InvalidOperation(format!("Account {actor} cannot follow itself")));
        }
        let mut accounts = self.inner.accounts.write();
        if !accounts.contains_key(actor) {
            return Err(missing(actor));
        }
        if !accounts.contains_key(target) {
            return Err(missing(target));
        }

        // Both keys were checked above under the same guard.
        if let Some(t) = accounts.get_mut(target) {
            match direction {
                FollowDirection::Follow => { t.followers.insert(actor.clone()); }
                FollowDirection::Unfollow => { t.followers.remove(actor); }
            }
        }
        if let Some(a) = accounts.get_mut(actor) {
            match direction {
                FollowDirection::Follow => { a.following.insert(target.clone()); }
                FollowDirection::Unfollow => { a.following.remove(target); }
            }
        }
        Ok(())
    }
}

// ============================================================================
// NotificationStore impl
// ============================================================================

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create_notification(&self, new: NewNotification) -> Result<Notification> {
        let id = NotificationId(self.inner.next_notification_id.fetch_add(1, Ordering::Relaxed) + 1);
        let notification = Notification::from_new(id, new);
        self.inner.notifications.write().push(notification.clone());
        Ok(notification)
    }

    async fn notifications_for(&self, recipient: &AccountId) -> Result<Vec<Notification>> {
        Ok(self.inner.notifications.read()
            .iter()
            .rev()
            .filter(|n| &n.to == recipient)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: NotificationId) -> Result<bool> {
        let mut notifications = self.inner.notifications.write();
        match notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
