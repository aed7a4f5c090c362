//! Trigger/complete state machine behind the single display surface.
//!
//! # Design
//! A `FollowerSession` is owned by whichever thread drives the display. Each
//! `trigger` hands out a `PendingRequest` tagged with a fresh `RequestId`;
//! the host runs it wherever it likes and reports back through `complete`.
//! Only the completion for the most recent trigger is applied, so a slow
//! earlier response can never overwrite a newer one.

use std::fmt;

use rand::{rng, RngExt};

use crate::client::GitHubClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::select::pick_with;
use crate::types::FollowerRecord;

pub const LOADING_TEXT: &str = "Loading random follower...";
pub const FAILURE_TEXT: &str = "Request Failed";
pub const SUCCESS_PREFIX: &str = "Random follower - ";

/// Identifies one trigger within a session. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request the host must execute and report back with the same id.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub id: RequestId,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Displayed(FollowerRecord),
    Failed(ApiError),
}

impl RequestState {
    pub fn display_text(&self) -> String {
        match self {
            RequestState::Idle => String::new(),
            RequestState::Loading => LOADING_TEXT.to_string(),
            RequestState::Displayed(follower) => format!("{SUCCESS_PREFIX}{}", follower.login),
            RequestState::Failed(_) => FAILURE_TEXT.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct FollowerSession {
    client: GitHubClient,
    user: String,
    state: RequestState,
    latest: Option<RequestId>,
}

impl FollowerSession {
    pub fn new(client: GitHubClient, user: impl Into<String>) -> Self {
        Self {
            client,
            user: user.into(),
            state: RequestState::Idle,
            latest: None,
        }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn display_text(&self) -> String {
        self.state.display_text()
    }

    /// Id of the most recent trigger, if any.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    /// Start a new cycle. Returns `None` (and moves to `Failed`) when no
    /// request can be built for the configured user.
    pub fn trigger(&mut self) -> Option<PendingRequest> {
        let id = RequestId(self.latest.map_or(1, |RequestId(n)| n + 1));
        self.latest = Some(id);

        match self.client.build_load_followers(&self.user) {
            Ok(request) => {
                self.state = RequestState::Loading;
                Some(PendingRequest { id, request })
            }
            Err(err) => {
                self.fail(id, err);
                None
            }
        }
    }

    /// Apply the outcome of request `id`. Returns `false` when `id` has been
    /// superseded and the outcome was dropped.
    pub fn complete(&mut self, id: RequestId, outcome: Result<HttpResponse, ApiError>) -> bool {
        self.complete_with(id, outcome, &mut rng())
    }

    pub fn complete_with<R: RngExt>(
        &mut self,
        id: RequestId,
        outcome: Result<HttpResponse, ApiError>,
        rng: &mut R,
    ) -> bool {
        if self.latest != Some(id) {
            tracing::debug!(request = %id, latest = ?self.latest, "dropping superseded response");
            return false;
        }

        let picked = outcome
            .and_then(|response| self.client.parse_load_followers(response))
            .and_then(|followers| pick_with(&followers, rng).cloned());

        match picked {
            Ok(follower) => {
                tracing::debug!(request = %id, login = %follower.login, "picked follower");
                self.state = RequestState::Displayed(follower);
            }
            Err(err) => self.fail(id, err),
        }
        true
    }

    fn fail(&mut self, id: RequestId, err: ApiError) {
        tracing::warn!(request = %id, user = %self.user, kind = err.kind(), error = %err, "request failed");
        self.state = RequestState::Failed(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> FollowerSession {
        FollowerSession::new(GitHubClient::new("http://localhost:3000"), "krishmasand")
    }

    fn ok(body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse::new(200, body))
    }

    #[test]
    fn starts_idle_with_empty_text() {
        let s = session();
        assert_eq!(s.state(), &RequestState::Idle);
        assert_eq!(s.display_text(), "");
        assert_eq!(s.latest_request(), None);
    }

    #[test]
    fn trigger_moves_to_loading() {
        let mut s = session();
        let pending = s.trigger().unwrap();
        assert_eq!(pending.id, RequestId(1));
        assert_eq!(
            pending.request.url,
            "http://localhost:3000/users/krishmasand/followers"
        );
        assert_eq!(s.display_text(), LOADING_TEXT);
    }

    #[test]
    fn success_shows_one_of_the_followers() {
        for _ in 0..50 {
            let mut s = session();
            let pending = s.trigger().unwrap();
            assert!(s.complete(pending.id, ok(r#"[{"login":"alice"},{"login":"bob"}]"#)));
            let text = s.display_text();
            assert!(
                text == "Random follower - alice" || text == "Random follower - bob",
                "unexpected text {text:?}"
            );
        }
    }

    #[test]
    fn seeded_completion_is_deterministic() {
        let body = r#"[{"login":"a"},{"login":"b"},{"login":"c"}]"#;
        let run = || {
            let mut s = session();
            let pending = s.trigger().unwrap();
            s.complete_with(pending.id, ok(body), &mut StdRng::seed_from_u64(7));
            s.display_text()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn transport_failure_shows_failure_text() {
        let mut s = session();
        let pending = s.trigger().unwrap();
        s.complete(
            pending.id,
            Err(ApiError::Transport("connection refused".to_string())),
        );
        assert_eq!(s.display_text(), FAILURE_TEXT);
        assert!(matches!(s.state(), RequestState::Failed(ApiError::Transport(_))));
    }

    #[test]
    fn not_found_shows_failure_text() {
        let mut s = session();
        let pending = s.trigger().unwrap();
        s.complete(pending.id, Ok(HttpResponse::new(404, r#"{"message":"Not Found"}"#)));
        assert_eq!(s.display_text(), FAILURE_TEXT);
        assert!(matches!(
            s.state(),
            RequestState::Failed(ApiError::HttpStatus { status: 404, .. })
        ));
    }

    #[test]
    fn malformed_body_shows_failure_text() {
        let mut s = session();
        let pending = s.trigger().unwrap();
        s.complete(pending.id, ok("<html>"));
        assert_eq!(s.display_text(), FAILURE_TEXT);
        assert!(matches!(s.state(), RequestState::Failed(ApiError::Decode(_))));
    }

    #[test]
    fn blank_login_shows_failure_text() {
        let mut s = session();
        let pending = s.trigger().unwrap();
        assert!(s.complete(pending.id, ok(r#"[{"login":""}]"#)));
        assert_eq!(s.display_text(), FAILURE_TEXT);
        assert!(matches!(s.state(), RequestState::Failed(ApiError::Decode(_))));
    }

    #[test]
    fn empty_list_fails_without_panicking() {
        let mut s = session();
        let pending = s.trigger().unwrap();
        assert!(s.complete(pending.id, ok("[]")));
        assert_eq!(s.display_text(), FAILURE_TEXT);
        assert_eq!(s.state(), &RequestState::Failed(ApiError::EmptyResult));
    }

    #[test]
    fn empty_user_fails_immediately() {
        let mut s = FollowerSession::new(GitHubClient::default(), "");
        assert!(s.trigger().is_none());
        assert_eq!(s.state(), &RequestState::Failed(ApiError::InvalidUser));
        assert_eq!(s.latest_request(), Some(RequestId(1)));
    }

    #[test]
    fn superseded_response_is_dropped() {
        let mut s = session();
        let first = s.trigger().unwrap();
        let second = s.trigger().unwrap();
        assert!(second.id > first.id);

        assert!(s.complete(second.id, ok(r#"[{"login":"second"}]"#)));
        assert!(!s.complete(first.id, ok(r#"[{"login":"first"}]"#)));
        assert_eq!(s.display_text(), "Random follower - second");
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut s = session();
        let first = s.trigger().unwrap();
        let _second = s.trigger().unwrap();
        assert!(!s.complete(first.id, ok(r#"[{"login":"first"}]"#)));
        assert_eq!(s.display_text(), LOADING_TEXT);
    }

    #[test]
    fn session_is_reentrant_after_terminal_state() {
        let mut s = session();
        let first = s.trigger().unwrap();
        s.complete(first.id, ok("[]"));
        assert_eq!(s.display_text(), FAILURE_TEXT);

        let second = s.trigger().unwrap();
        assert_eq!(s.display_text(), LOADING_TEXT);
        s.complete(second.id, ok(r#"[{"login":"carol"}]"#));
        assert_eq!(s.display_text(), "Random follower - carol");
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut s = session();
        assert!(!s.complete(RequestId(99), ok(r#"[{"login":"x"}]"#)));
        assert_eq!(s.state(), &RequestState::Idle);
    }
}
