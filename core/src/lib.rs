//! Request building, response parsing and follower selection for the
//! "random GitHub follower" app.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the HTTP
//! round-trip, which keeps the core deterministic and testable.
//!
//! # Design
//! - `GitHubClient` is stateless; it holds only the base URL and user agent.
//! - The followers endpoint is split into `build_load_followers` and
//!   `parse_load_followers`, so the I/O boundary is explicit.
//! - `FollowerSession` owns the display state and sequences overlapping
//!   triggers by `RequestId`.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod error;
pub mod http;
pub mod select;
pub mod session;
pub mod types;

pub use client::{GitHubClient, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use select::{pick, pick_index};
pub use session::{
    FollowerSession, PendingRequest, RequestId, RequestState, FAILURE_TEXT, LOADING_TEXT,
    SUCCESS_PREFIX,
};
pub use types::{FollowerList, FollowerRecord};
