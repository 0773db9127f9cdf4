//! Follow edge transitions.

use serde::{Deserialize, Serialize};

/// Which way a dual edge write goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowDirection {
    /// Add actor to target.followers and target to actor.following.
    Follow,
    /// Remove actor from target.followers and target from actor.following.
    Unfollow,
}

impl FollowDirection {
    /// The write that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Follow => Self::Unfollow,
            Self::Unfollow => Self::Follow,
        }
    }

    /// Whether edges should be present after the write.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Follow)
    }
}

/// Result of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowOutcome {
    Followed,
    Unfollowed,
}

impl From<FollowDirection> for FollowOutcome {
    fn from(dir: FollowDirection) -> Self {
        match dir {
            FollowDirection::Follow => Self::Followed,
            FollowDirection::Unfollow => Self::Unfollowed,
        }
    }
}

impl std::fmt::Display for FollowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Followed => f.write_str("followed"),
            Self::Unfollowed => f.write_str("unfollowed"),
        }
    }
}
