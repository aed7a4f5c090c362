//! Domain DTOs for the GitHub followers API.
//!
//! # Design
//! Only `login` is required. The API returns many more fields per user; the
//! few that a display shell might want are decoded as optional and the rest
//! are ignored by serde.

use serde::{Deserialize, Serialize};

/// One user returned by `GET /users/{user}/followers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowerRecord {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl FollowerRecord {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            id: None,
            avatar_url: None,
            html_url: None,
        }
    }
}

/// Followers in the order the API returned them.
pub type FollowerList = Vec<FollowerRecord>;
