use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{TweetView, UserView};

/// Bare acknowledgement: `{"result": true}`
#[derive(Debug, Serialize, ToSchema)]
pub struct Ack {
    #[schema(example = true)]
    pub result: bool,
}

impl Ack {
    pub fn ok() -> Json<Self> {
        Json(Self { result: true })
    }

    pub fn created() -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok())
    }
}

/// Created response helper (DRY - common pattern for POST endpoints)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// `{"result": true, "user": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub result: bool,
    pub user: UserView,
}

impl UserResponse {
    pub fn new(user: UserView) -> Self {
        Self { result: true, user }
    }
}

/// `{"result": true, "tweets": [...]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedResponse {
    pub result: bool,
    pub tweets: Vec<TweetView>,
}

impl FeedResponse {
    pub fn new(tweets: Vec<TweetView>) -> Self {
        Self {
            result: true,
            tweets,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TweetCreatedResponse {
    pub result: bool,
    #[schema(example = 1)]
    pub tweet_id: i32,
}

impl TweetCreatedResponse {
    pub fn new(tweet_id: i32) -> Self {
        Self {
            result: true,
            tweet_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaCreatedResponse {
    pub result: bool,
    #[schema(example = 1)]
    pub media_id: i32,
}

impl MediaCreatedResponse {
    pub fn new(media_id: i32) -> Self {
        Self {
            result: true,
            media_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_carries_result_flag_and_201() {
        let response = Created(TweetCreatedResponse::new(4)).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = serde_json::to_value(TweetCreatedResponse::new(4)).unwrap();
        assert_eq!(json, serde_json::json!({"result": true, "tweet_id": 4}));
    }

    #[test]
    fn empty_feed_still_lists_tweets() {
        let json = serde_json::to_value(FeedResponse::new(vec![])).unwrap();

        assert_eq!(json, serde_json::json!({"result": true, "tweets": []}));
    }
}
