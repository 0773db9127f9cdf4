//! # follow-graph — Social Graph Relationship Manager
//!
//! Maintains follow/unfollow edges between accounts, records a notification
//! for every follow, and suggests accounts the caller does not follow yet.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `AccountStore` and `NotificationStore` are the contract
//!    between the core and durable storage
//! 2. **Clean DTOs**: `Account`, `AccountSummary`, `Notification` cross all boundaries
//! 3. **Explicit actor**: every operation takes the calling account as a
//!    parameter; nothing is read from ambient request state
//! 4. **Symmetric edges**: `B ∈ A.following ⇔ A ∈ B.followers`, always
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use follow_graph::{Account, AccountId, FollowOutcome, SocialGraph};
//!
//! # async fn example() -> follow_graph::Result<()> {
//! let graph = SocialGraph::open_memory();
//! graph.accounts().register(Account::new("u1", "ada"))?;
//! graph.accounts().register(Account::new("u2", "grace"))?;
//!
//! let (ada, grace) = (AccountId::from("u1"), AccountId::from("u2"));
//! assert_eq!(graph.toggle_follow(&ada, &grace).await?, FollowOutcome::Followed);
//!
//! for suggestion in graph.suggest_users(&ada).await? {
//!     println!("{} (@{})", suggestion.full_name, suggestion.username);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Stores
//!
//! | Store | Config | Description |
//! |---------|---------|-------------|
//! | Memory | `StoreConfig::Memory` | In-memory, for testing/embedding |
//! | Custom | `SocialGraph::with_stores` | Any `AccountStore` + `NotificationStore` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod tx;
pub mod mutator;
pub mod suggest;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Account, AccountId, AccountSummary,
    FollowDirection, FollowOutcome,
    NewNotification, Notification, NotificationId, NotificationKind,
};

// ============================================================================
// Re-exports: Storage, config
// ============================================================================

pub use storage::{AccountStore, MemoryStore, NotificationStore, StoreConfig};
pub use suggest::{SamplingStrategy, SuggestConfig};
pub use config::GraphConfig;
pub use tx::{LockTable, TxId};

use std::sync::Arc;

// ============================================================================
// Top-level SocialGraph handle
// ============================================================================

/// The primary entry point. A `SocialGraph` wraps an account store and a
/// notification store and exposes the follow toggle and suggestions.
///
/// It is cheap to share behind an `Arc`; concurrent calls are safe.
pub struct SocialGraph<A: AccountStore, N: NotificationStore> {
    accounts: Arc<A>,
    notifications: Arc<N>,
    locks: LockTable,
    config: GraphConfig,
}

impl<A: AccountStore, N: NotificationStore> SocialGraph<A, N> {
    /// Create a graph over the given stores with default configuration.
    pub fn with_stores(accounts: A, notifications: N) -> Self {
        Self {
            accounts: Arc::new(accounts),
            notifications: Arc::new(notifications),
            locks: LockTable::new(),
            config: GraphConfig::default(),
        }
    }

    /// Replace the configuration. Fails with `Error::Config` if invalid.
    pub fn with_config(mut self, config: GraphConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Follow `target` as `actor`, or unfollow if already following.
    pub async fn toggle_follow(&self, actor: &AccountId, target: &AccountId) -> Result<FollowOutcome> {
        mutator::toggle_follow(
            self.accounts.as_ref(),
            self.notifications.as_ref(),
            &self.locks,
            actor,
            target,
        ).await
    }

    /// Up to `result_size` (default 4) accounts `actor` might follow.
    pub async fn suggest_users(&self, actor: &AccountId) -> Result<Vec<AccountSummary>> {
        suggest::suggest_users(self.accounts.as_ref(), actor, &self.config.suggestions).await
    }

    /// Public profile by username, credential stripped.
    pub async fn profile(&self, username: &str) -> Result<AccountSummary> {
        self.accounts.find_by_username(username).await?
            .map(AccountSummary::from)
            .ok_or_else(|| Error::NotFound(format!("User {username}")))
    }

    /// Notifications addressed to `recipient`, newest first.
    pub async fn notifications(&self, recipient: &AccountId) -> Result<Vec<Notification>> {
        self.notifications.notifications_for(recipient).await
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Access the account store (for seeding and advanced use).
    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    /// Access the notification store.
    pub fn notification_store(&self) -> &N {
        &self.notifications
    }
}

/// In-memory graph for testing and embedding.
impl SocialGraph<MemoryStore, MemoryStore> {
    pub fn open_memory() -> Self {
        let store = MemoryStore::new();
        Self::with_stores(store.clone(), store)
    }

    /// Open the store named by `config.store`.
    pub fn open(config: GraphConfig) -> Result<Self> {
        match config.store {
            StoreConfig::Memory => Self::open_memory().with_config(config),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the failure came from a store rather than from the request.
    /// The core never retries; callers may.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::StorageFailure(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
