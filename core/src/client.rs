//! Stateless HTTP request builder and response parser for the followers API.
//!
//! # Design
//! `GitHubClient` holds only configuration (`base_url`, `user_agent`) and
//! carries no mutable state between calls. The followers endpoint is split
//! into `build_load_followers`, which produces an `HttpRequest`, and
//! `parse_load_followers`, which consumes an `HttpResponse`. The host executes
//! the round-trip in between.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::FollowerList;

/// Base URL of the public GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// GitHub refuses requests that carry no `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("random-follower/", env!("CARGO_PKG_VERSION"));

const ACCEPT: &str = "application/vnd.github+json";

/// Synchronous, stateless client for the followers endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubClient {
    base_url: String,
    user_agent: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GitHubClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `GET {base}/users/{user}/followers`. The username goes into the path
    /// as given.
    pub fn build_load_followers(&self, user: &str) -> Result<HttpRequest, ApiError> {
        if user.trim().is_empty() {
            return Err(ApiError::InvalidUser);
        }
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/users/{user}/followers", self.base_url),
            headers: vec![
                ("accept".to_string(), ACCEPT.to_string()),
                ("user-agent".to_string(), self.user_agent.clone()),
            ],
        })
    }

    pub fn parse_load_followers(&self, response: HttpResponse) -> Result<FollowerList, ApiError> {
        check_status(&response)?;
        let followers: FollowerList =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        check_logins(&followers)?;
        Ok(followers)
    }
}

/// Every record must carry a non-blank `login`.
fn check_logins(followers: &FollowerList) -> Result<(), ApiError> {
    match followers.iter().position(|f| f.login.trim().is_empty()) {
        Some(index) => Err(ApiError::Decode(format!("follower {index} has an empty login"))),
        None => Ok(()),
    }
}

/// Map any non-2xx status to `ApiError::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
