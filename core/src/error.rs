//! Error types for the followers client.
//!
//! # Design
//! The variants exist for diagnostics. A display shell collapses all of them
//! into one failure message; logs and the C ABI keep the distinction.
//! `Transport` is never produced by the core itself: the host reports it
//! after failing to execute a request.

use thiserror::Error;

/// Everything that can go wrong between a trigger and a displayed follower.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The username to query was empty.
    #[error("username must not be empty")]
    InvalidUser,

    /// The host could not complete the round-trip (DNS, connect, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The body was not a JSON array of follower records.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request succeeded but returned no followers to pick from.
    #[error("no followers to pick from")]
    EmptyResult,
}

impl ApiError {
    /// Stable short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidUser => "invalid_user",
            ApiError::Transport(_) => "transport",
            ApiError::HttpStatus { .. } => "http_status",
            ApiError::Decode(_) => "decode",
            ApiError::EmptyResult => "empty_result",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = ApiError::HttpStatus {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(err.kind(), "http_status");
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            ApiError::InvalidUser.kind(),
            ApiError::Transport(String::new()).kind(),
            ApiError::HttpStatus { status: 500, body: String::new() }.kind(),
            ApiError::Decode(String::new()).kind(),
            ApiError::EmptyResult.kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
