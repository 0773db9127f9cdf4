//! Account in the social graph.

use chrono::{DateTime, Utc};
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Opaque account identifier.
///
/// Identity is exact string equality. Ordering is lexicographic and is what
/// the lock table uses to acquire a pair of accounts without deadlocking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A stored user account with both sides of its follow edges.
///
/// `followers` holds the accounts that follow this one, `following` the
/// accounts this one follows. Neither set ever contains `id`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    /// Credential hash. Never serialized, never leaves the store in a summary.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub profile_img: Option<String>,
    pub followers: HashSet<AccountId>,
    pub following: HashSet<AccountId>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            full_name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            profile_img: None,
            followers: HashSet::new(),
            following: HashSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    pub fn with_profile_img(mut self, url: impl Into<String>) -> Self {
        self.profile_img = Some(url.into());
        self
    }

    pub fn is_following(&self, other: &AccountId) -> bool {
        self.following.contains(other)
    }

    pub fn is_followed_by(&self, other: &AccountId) -> bool {
        self.followers.contains(other)
    }

    /// Public projection with the credential stripped.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary::from(self.clone())
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("profile_img", &self.profile_img)
            .field("followers", &self.followers)
            .field("following", &self.following)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// What callers get back about an account: everything except the secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub full_name: String,
    pub profile_img: Option<String>,
    pub followers: HashSet<AccountId>,
    pub following: HashSet<AccountId>,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            full_name: account.full_name,
            profile_img: account.profile_img,
            followers: account.followers,
            following: account.following,
        }
    }
}
