//! Graph mutator: the follow/unfollow toggle.
//!
//! ```text
//! lock pair ─▶ read actor, target ─▶ decide ─▶ dual edge write
//!                                               │
//!                                   Follow ─────┴─▶ one notification
//! ```
//!
//! The pair lock is held across read, decide and write, so concurrent
//! toggles on the same pair are applied one after another and each sees the
//! previous one's result.

use tracing::{debug, info, warn};
use crate::model::*;
use crate::storage::{AccountStore, NotificationStore};
use crate::tx::LockTable;
use crate::{Error, Result};

/// Follow `target` if `actor` does not follow it yet, unfollow otherwise.
///
/// Errors:
/// - `InvalidOperation` when `actor == target`, whatever the state of either.
/// - `NotFound` when either account is missing. Nothing is written.
/// - `StorageFailure` from either store. Edges are left as they were before
///   the call; a follow whose notification cannot be stored is reverted.
#[tracing::instrument(
    level = "debug",
    skip(accounts, notifications, locks, actor, target),
    fields(actor = %actor, target = %target),
)]
pub async fn toggle_follow<A, N>(
    accounts: &A,
    notifications: &N,
    locks: &LockTable,
    actor: &AccountId,
    target: &AccountId,
) -> Result<FollowOutcome>
where
    A: AccountStore,
    N: NotificationStore,
{
    if actor == target {
        return Err(Error::InvalidOperation(format!("Account {actor} cannot follow itself")));
    }

    let guard = locks.lock_pair(actor, target).await;
    let tx = guard.tx();

    let current = accounts.get_account(actor).await?
        .ok_or_else(|| Error::NotFound(format!("Account {actor}")))?;
    if accounts.get_account(target).await?.is_none() {
        return Err(Error::NotFound(format!("Account {target}")));
    }

    let direction = if current.is_following(target) {
        FollowDirection::Unfollow
    } else {
        FollowDirection::Follow
    };
    debug!(%tx, ?direction, "applying follow edges");

    accounts.update_follow_edges(actor, target, direction).await?;

    if direction == FollowDirection::Follow {
        let new = NewNotification::follow(actor.clone(), target.clone());
        if let Err(err) = notifications.create_notification(new).await {
            warn!(%tx, error = %err, "follow notification failed, reverting edges");
            if let Err(revert) = accounts
                .update_follow_edges(actor, target, direction.inverse())
                .await
            {
                warn!(%tx, error = %revert, "edge revert failed");
            }
            return Err(err);
        }
    }

    drop(guard);
    let outcome = FollowOutcome::from(direction);
    info!(%tx, %outcome, "follow toggled");
    Ok(outcome)
}
