use std::collections::HashMap;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app_with, demo_followers, Follower, DEMO_USER, LONELY_USER};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

#[tokio::test]
async fn list_followers_of_demo_user() {
    let resp = app_with(demo_followers())
        .oneshot(get(&format!("/users/{DEMO_USER}/followers")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let followers: Vec<Follower> = body_json(resp).await;
    let logins: Vec<_> = followers.iter().map(|f| f.login.as_str()).collect();
    assert_eq!(logins, ["alice", "bob", "carol"]);
}

#[tokio::test]
async fn list_followers_preserves_order() {
    let data = HashMap::from([(
        "someone".to_string(),
        vec![Follower::new("zed", 9), Follower::new("amy", 1)],
    )]);
    let resp = app_with(data)
        .oneshot(get("/users/someone/followers"))
        .await
        .unwrap();

    let followers: Vec<Follower> = body_json(resp).await;
    assert_eq!(followers[0].login, "zed");
    assert_eq!(followers[1].login, "amy");
}

#[tokio::test]
async fn list_followers_empty_list() {
    let resp = app_with(demo_followers())
        .oneshot(get(&format!("/users/{LONELY_USER}/followers")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let followers: Vec<Follower> = body_json(resp).await;
    assert!(followers.is_empty());
}

#[tokio::test]
async fn unknown_user_returns_404_with_message() {
    let resp = app_with(HashMap::new())
        .oneshot(get("/users/nobody/followers"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app_with(demo_followers())
        .oneshot(get(&format!("/users/{DEMO_USER}/following")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_is_not_allowed() {
    let resp = app_with(demo_followers())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/users/{DEMO_USER}/followers"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn store_is_shared_across_requests() {
    let router = app_with(demo_followers());

    let missing = router
        .clone()
        .oneshot(get("/users/nobody/followers"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let resp = router
        .oneshot(get(&format!("/users/{DEMO_USER}/followers")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let followers: Vec<Follower> = body_json(resp).await;
    assert_eq!(followers.len(), 3);
}
