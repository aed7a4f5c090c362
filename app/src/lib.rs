//! Terminal host for the random-follower app.
//!
//! Plays the part a mobile shell plays over the C ABI: it owns the display,
//! performs the HTTP round-trips (ureq on tokio's blocking pool) and feeds
//! the results back into a `follower_core::FollowerSession`.

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod transport;

pub use config::AppConfig;
pub use driver::{run, Completion, Driver};
pub use error::AppError;
pub use transport::{Transport, UreqTransport};
