//! Verify build/parse against JSON test vectors stored in `test-vectors/`.
//!
//! Each case describes an input user, the expected request, a simulated
//! response and the expected parse result. Parsed values are compared, not
//! raw strings, so field ordering in the vectors does not matter.

use follower_core::{FollowerRecord, GitHubClient, HttpMethod, HttpResponse};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> GitHubClient {
    GitHubClient::new(BASE_URL).with_user_agent("tests/1.0")
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

#[test]
fn load_followers_test_vectors() {
    let raw = include_str!("../../test-vectors/load_followers.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let user = case["input_user"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_load_followers(user).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.method.as_str(), expected_req["method"].as_str().unwrap(), "{name}: method name");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let result = c.parse_load_followers(response);
        let expected = &case["expected_result"];

        if let Some(ok) = expected.get("ok") {
            let expected: Vec<FollowerRecord> = serde_json::from_value(ok.clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            continue;
        }

        let err = result.expect_err(name);
        assert_eq!(err.kind(), expected["error"].as_str().unwrap(), "{name}: error kind");
        if let Some(status) = expected.get("status") {
            match err {
                follower_core::ApiError::HttpStatus { status: got, .. } => {
                    assert_eq!(u64::from(got), status.as_u64().unwrap(), "{name}: status")
                }
                other => panic!("{name}: expected status error, got {other:?}"),
            }
        }
    }
}

#[test]
fn empty_user_vector_is_rejected_before_any_request() {
    let err = client().build_load_followers("").unwrap_err();
    assert_eq!(err.kind(), "invalid_user");
}
