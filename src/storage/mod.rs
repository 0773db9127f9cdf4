//! # Store Contracts
//!
//! The two collaborators the core talks to. Everything durable lives behind
//! these traits; the mutator and sampler only ever see `Account` and
//! `Notification` DTOs.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory, serves as both stores |

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::model::*;
use crate::Result;

pub use memory::MemoryStore;

// ============================================================================
// Store Configuration
// ============================================================================

/// Which built-in store a `SocialGraph` should open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-memory (no persistence)
    #[default]
    Memory,
}

// ============================================================================
// AccountStore Trait
// ============================================================================

/// Durable key → account storage.
///
/// Every failure to reach the store or a rejected write is reported as
/// `Error::StorageFailure`. A missing account is `Ok(None)`, not an error.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    // ========================================================================
    // Reads
    // ========================================================================

    /// Get an account by ID. Returns None if not found.
    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>>;

    /// Get an account by its unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Uniform random sample of up to `size` accounts, without replacement,
    /// in random order. Accounts whose id is in `exclude` are never returned.
    async fn sample_accounts(&self, exclude: &[AccountId], size: usize) -> Result<Vec<Account>>;

    // ========================================================================
    // Single-sided edge writes
    // ========================================================================

    /// Add (`present`) or remove `follower` from `target.followers`.
    async fn set_follower_edge(
        &self,
        target: &AccountId,
        follower: &AccountId,
        present: bool,
    ) -> Result<()>;

    /// Add (`present`) or remove `target` from `actor.following`.
    async fn set_following_edge(
        &self,
        actor: &AccountId,
        target: &AccountId,
        present: bool,
    ) -> Result<()>;

    // ========================================================================
    // Dual write
    // ========================================================================

    /// Apply both sides of a follow edge as one unit.
    ///
    /// Default: follower side first, then following side. If the second write
    /// fails the first is reverted before the error is returned, so no
    /// half-edge is left behind. Stores with multi-record transactions should
    /// override this.
    async fn update_follow_edges(
        &self,
        actor: &AccountId,
        target: &AccountId,
        direction: FollowDirection,
    ) -> Result<()> {
        let present = direction.is_present();
        self.set_follower_edge(target, actor, present).await?;

        if let Err(err) = self.set_following_edge(actor, target, present).await {
            warn!(%actor, %target, ?direction, error = %err, "following-side write failed, reverting follower side");
            if let Err(revert) = self.set_follower_edge(target, actor, !present).await {
                warn!(%actor, %target, error = %revert, "follower-side revert failed");
            }
            return Err(err);
        }
        Ok(())
    }
}

// ============================================================================
// NotificationStore Trait
// ============================================================================

/// Durable append-only notification storage.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist a new notification and return the stored record.
    async fn create_notification(&self, new: NewNotification) -> Result<Notification>;

    /// All notifications addressed to `recipient`, newest first.
    async fn notifications_for(&self, recipient: &AccountId) -> Result<Vec<Notification>>;

    /// Mark one notification read. Returns true if it existed.
    async fn mark_read(&self, id: NotificationId) -> Result<bool>;
}
