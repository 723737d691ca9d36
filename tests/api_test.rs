//! End-to-end API tests over the real service stack and an in-memory
//! SQLite database.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use microblog_api::api::create_router;
use microblog_api::commands::seed::seed_demo_users;
use microblog_api::config::API_KEY_HEADER;
use microblog_api::infra::{Database, Persistence};
use microblog_api::AppState;

use common::sqlite_config;

/// Router with the demo users seeded: `test` is id 1, `David` is id 2.
struct TestApp {
    router: Router,
    _media: TempDir,
}

impl TestApp {
    async fn start() -> Self {
        let media = TempDir::new().unwrap();
        let config = sqlite_config(media.path());
        let database = Arc::new(Database::connect(&config).await.unwrap());
        seed_demo_users(&Persistence::new(database.get_connection()))
            .await
            .unwrap();

        Self {
            router: create_router(AppState::from_config(database, &config)),
            _media: media,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn call(&self, method: &str, uri: &str, api_key: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(API_KEY_HEADER, api_key);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        self.send(request.unwrap()).await
    }

    async fn upload(&self, api_key: &str, file_name: &str, content: &str) -> i64 {
        let body = format!(
            "--XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {}\r\n\
             --XBOUNDARY--\r\n",
            file_name, content
        );
        let request = Request::post("/api/medias")
            .header(API_KEY_HEADER, api_key)
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();

        let (status, body) = self.send(request).await;
        assert_eq!(status, StatusCode::CREATED);
        body["media_id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn unknown_api_key_is_unauthorized() {
    let app = TestApp::start().await;

    let (status, body) = app.call("GET", "/api/users/me", "nobody", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["result"], false);
    assert_eq!(body["error_message"], "Invalid API Key");
}

#[tokio::test]
async fn fresh_profile_omits_empty_lists() {
    let app = TestApp::start().await;

    let (status, body) = app.call("GET", "/api/users/me", "test", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": true, "user": {"id": 1, "name": "test"}}));
}

#[tokio::test]
async fn feed_shows_author_likes_and_attachments() {
    let app = TestApp::start().await;

    let second = app.upload("test", "b.png", "bbb").await;
    let first = app.upload("test", "a.png", "aaa").await;

    let (status, body) = app
        .call(
            "POST",
            "/api/tweets",
            "test",
            Some(json!({"tweet_data": "with media", "tweet_media_ids": [first, second]})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let tweet_id = body["tweet_id"].as_i64().unwrap();

    let (status, _) = app
        .call("POST", "/api/tweets", "david", Some(json!({"tweet_data": "plain"})))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call("POST", &format!("/api/tweets/{}/likes", tweet_id), "david", None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"result": true}));

    let (status, body) = app.call("GET", "/api/tweets", "test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);

    let tweets = body["tweets"].as_array().unwrap();
    assert_eq!(tweets.len(), 2);

    let media = &tweets[0];
    assert_eq!(media["content"], "with media");
    assert_eq!(media["author"], json!({"id": 1, "name": "test"}));
    assert_eq!(media["likes"], json!([{"user_id": 2, "name": "David"}]));

    let paths: Vec<PathBuf> = media["attachments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| PathBuf::from(p.as_str().unwrap()))
        .collect();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].to_string_lossy().ends_with("_a.png"));
    assert!(paths[1].to_string_lossy().ends_with("_b.png"));
    assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "aaa");

    let plain = &tweets[1];
    assert_eq!(plain["content"], "plain");
    assert!(plain.get("likes").is_none());
    assert!(plain.get("attachments").is_none());
}

#[tokio::test]
async fn each_tweet_keeps_its_own_attachments() {
    let app = TestApp::start().await;

    let shared = app.upload("test", "shared.png", "s").await;
    let own = app.upload("test", "own.png", "o").await;

    for media in [json!([own, shared]), json!([shared])] {
        let (status, _) = app
            .call(
                "POST",
                "/api/tweets",
                "test",
                Some(json!({"tweet_data": "pic", "tweet_media_ids": media})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app.call("GET", "/api/tweets", "test", None).await;
    let names: Vec<Vec<String>> = body["tweets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tweet| {
            tweet["attachments"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p.as_str().unwrap().rsplit('_').next().unwrap().to_string())
                .collect()
        })
        .collect();

    assert_eq!(
        names,
        vec![vec!["own.png", "shared.png"], vec!["shared.png"]]
    );
}

#[tokio::test]
async fn liking_twice_conflicts_and_unlike_restores() {
    let app = TestApp::start().await;

    let (_, body) = app
        .call("POST", "/api/tweets", "test", Some(json!({"tweet_data": "hi"})))
        .await;
    let likes = format!("/api/tweets/{}/likes", body["tweet_id"]);

    assert_eq!(app.call("POST", &likes, "david", None).await.0, StatusCode::CREATED);
    assert_eq!(app.call("POST", &likes, "david", None).await.0, StatusCode::CONFLICT);
    assert_eq!(app.call("DELETE", &likes, "david", None).await.0, StatusCode::OK);
    assert_eq!(app.call("DELETE", &likes, "david", None).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_the_author_can_delete_a_tweet() {
    let app = TestApp::start().await;

    let (_, body) = app
        .call("POST", "/api/tweets", "test", Some(json!({"tweet_data": "mine"})))
        .await;
    let uri = format!("/api/tweets/{}", body["tweet_id"]);

    assert_eq!(app.call("DELETE", &uri, "david", None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.call("DELETE", &uri, "test", None).await.0, StatusCode::OK);

    let (_, feed) = app.call("GET", "/api/tweets", "test", None).await;
    assert_eq!(feed, json!({"result": true, "tweets": []}));
}

#[tokio::test]
async fn follow_shows_on_both_profiles_until_unfollowed() {
    let app = TestApp::start().await;

    let (status, _) = app.call("POST", "/api/users/2/follow", "test", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, me) = app.call("GET", "/api/users/me", "test", None).await;
    assert_eq!(me["user"]["following"], json!([{"id": 2, "name": "David"}]));
    assert!(me["user"].get("followers").is_none());

    let (_, david) = app.call("GET", "/api/users/2", "test", None).await;
    assert_eq!(david["user"]["followers"], json!([{"id": 1, "name": "test"}]));

    let (status, _) = app.call("POST", "/api/users/2/follow", "test", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.call("DELETE", "/api/users/2/follow", "test", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, me) = app.call("GET", "/api/users/me", "test", None).await;
    assert!(me["user"].get("following").is_none());
}

#[tokio::test]
async fn following_yourself_or_a_stranger_fails() {
    let app = TestApp::start().await;

    let (status, _) = app.call("POST", "/api/users/1/follow", "test", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.call("POST", "/api/users/99/follow", "test", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
