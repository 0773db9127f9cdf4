//! Suggestion sampler.
//!
//! Draws a random pool from the account store, drops the actor and anyone
//! the actor already follows, and returns the first few in sampling order.
//! No ranking, no friend-of-friend traversal.

use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::model::*;
use crate::storage::AccountStore;
use crate::{Error, Result};

/// How exclusion of already-followed accounts is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// The store excludes only the actor; followed accounts are filtered out
    /// of the pool afterwards. A pool may shrink below `result_size`.
    #[default]
    PostFilter,
    /// The store also excludes the actor's following set, so no draw is
    /// wasted. Preferable once the population is large.
    StoreExclusion,
}

/// Suggestion sizes and strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// How many accounts to draw from the store.
    pub pool_size: usize,
    /// How many to return at most.
    pub result_size: usize,
    pub strategy: SamplingStrategy,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            result_size: 4,
            strategy: SamplingStrategy::PostFilter,
        }
    }
}

impl SuggestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(Error::Config("suggestions.pool_size must be at least 1".into()));
        }
        if self.result_size == 0 {
            return Err(Error::Config("suggestions.result_size must be at least 1".into()));
        }
        if self.result_size > self.pool_size {
            return Err(Error::Config(format!(
                "suggestions.result_size ({}) exceeds pool_size ({})",
                self.result_size, self.pool_size
            )));
        }
        Ok(())
    }
}

/// Suggest up to `config.result_size` accounts for `actor` to follow.
///
/// The actor must exist (`NotFound` otherwise). Returned summaries never
/// include the actor, never include an account in `actor.following`, and
/// never carry the credential field. Fewer eligible accounts than
/// `result_size` means a shorter result, not an error.
#[tracing::instrument(level = "debug", skip(accounts, actor, config), fields(actor = %actor))]
pub async fn suggest_users<A: AccountStore>(
    accounts: &A,
    actor: &AccountId,
    config: &SuggestConfig,
) -> Result<Vec<AccountSummary>> {
    let me = accounts.get_account(actor).await?
        .ok_or_else(|| Error::NotFound(format!("Account {actor}")))?;

    let mut exclude = vec![actor.clone()];
    if config.strategy == SamplingStrategy::StoreExclusion {
        exclude.extend(me.following.iter().cloned());
    }

    let pool = accounts.sample_accounts(&exclude, config.pool_size).await?;
    let pool_len = pool.len();

    // Exact id equality; the store's own exclusion is not trusted here.
    let picked: Vec<AccountSummary> = pool
        .into_iter()
        .filter(|a| a.id != *actor && !me.following.contains(&a.id))
        .take(config.result_size)
        .map(AccountSummary::from)
        .collect();

    debug!(pool = pool_len, returned = picked.len(), "suggestions sampled");
    Ok(picked)
}
