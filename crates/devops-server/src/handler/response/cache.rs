use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A key and the value stored under it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
}
