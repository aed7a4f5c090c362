use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// User who is followed by the demo data set.
pub const DEMO_USER: &str = "krishmasand";

/// User with a follower list that exists but is empty.
pub const LONELY_USER: &str = "lonely";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub site_admin: bool,
}

impl Follower {
    pub fn new(login: &str, id: u64) -> Self {
        Self {
            login: login.to_string(),
            id,
            avatar_url: format!("https://avatars.githubusercontent.com/u/{id}?v=4"),
            html_url: format!("https://github.com/{login}"),
            kind: "User".to_string(),
            site_admin: false,
        }
    }
}

/// Follower lists by login. Fixed once the router is built.
pub type Db = Arc<HashMap<String, Vec<Follower>>>;

pub fn app_with(followers: HashMap<String, Vec<Follower>>) -> Router {
    let db: Db = Arc::new(followers);
    Router::new()
        .route("/users/{user}/followers", get(list_followers))
        .with_state(db)
}

/// The data set served by the `mock-server` binary and the integration tests.
pub fn demo_followers() -> HashMap<String, Vec<Follower>> {
    HashMap::from([
        (
            DEMO_USER.to_string(),
            vec![
                Follower::new("alice", 1),
                Follower::new("bob", 2),
                Follower::new("carol", 3),
            ],
        ),
        (LONELY_USER.to_string(), Vec::new()),
    ])
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(demo_followers())).await
}

async fn list_followers(
    State(db): State<Db>,
    Path(user): Path<String>,
) -> Result<Json<Vec<Follower>>, (StatusCode, Json<Value>)> {
    db.get(&user).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest/users/followers#list-followers-of-a-user",
            })),
        )
    })
}
