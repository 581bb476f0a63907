//! User response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user record.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Creates a new user record.
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Response body of the user listing.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Response body of user creation: the submitted document echoed back.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserCreated {
    pub message: String,
    pub user: serde_json::Value,
}

impl UserCreated {
    pub fn new(user: serde_json::Value) -> Self {
        Self {
            message: "User created successfully".to_owned(),
            user,
        }
    }
}
