//! Graph configuration.
//!
//! Everything has a default; a JSON document only needs the keys it changes.
//!
//! ```json
//! { "suggestions": { "pool_size": 20, "result_size": 5, "strategy": "store_exclusion" },
//!   "store": { "kind": "memory" } }
//! ```

use serde::{Deserialize, Serialize};
use crate::storage::StoreConfig;
use crate::suggest::SuggestConfig;
use crate::Result;

/// Top-level configuration for a `SocialGraph`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub suggestions: SuggestConfig,
    pub store: StoreConfig,
}

impl GraphConfig {
    /// Decode and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.suggestions.validate()
    }
}
