//! # Social Graph Model
//!
//! Clean DTOs shared by the mutator, the sampler, and every store.
//!
//! Design rule: this module is pure data — no I/O, no locks, no async.

pub mod account;
pub mod follow;
pub mod notification;

pub use account::{Account, AccountId, AccountSummary};
pub use follow::{FollowDirection, FollowOutcome};
pub use notification::{NewNotification, Notification, NotificationId, NotificationKind};
