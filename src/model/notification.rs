//! Notification records produced by graph mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::AccountId;

/// Store-assigned notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of notification kinds. Only `Follow` is produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Follow => "follow",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification before the store has accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub from: AccountId,
    pub to: AccountId,
    pub kind: NotificationKind,
}

impl NewNotification {
    pub fn follow(from: AccountId, to: AccountId) -> Self {
        Self { from, to, kind: NotificationKind::Follow }
    }
}

/// A persisted notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub from: AccountId,
    pub to: AccountId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Materialize a new record. `read` always starts false.
    pub fn from_new(id: NotificationId, new: NewNotification) -> Self {
        Self {
            id,
            from: new.from,
            to: new.to,
            kind: new.kind,
            read: false,
            created_at: Utc::now(),
        }
    }
}
